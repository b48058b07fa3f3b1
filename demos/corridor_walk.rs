use std::time::Instant;

use tilewall::*;

fn main() {
    // 64x64 level: solid border, a pillar every 4th tile on even rows.
    let w = 64u16; let h = 64u16;
    let mut tiles = vec![0u8; (w as usize) * (h as usize)];
    for y in 0..h { for x in 0..w {
        let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
        let pillar = x % 4 == 0 && y % 2 == 0;
        if border || pillar { tiles[(y as usize) * (w as usize) + x as usize] = SOLID_TILE; }
    }}
    let grid = CollisionGrid::new(w, &tiles).checked();
    let mut collider = match LevelCollider::new(CollisionConfig::default()) {
        Ok(c) => c,
        Err(e) => { eprintln!("{e}"); return; }
    };

    // Walk right along row 1 until blocked, one pixel per frame.
    let mut bounds = PixelBox::new(16, 16, 16, 16);
    loop {
        bounds.pos.x += 1;
        match collider.check_collision(0, bounds, &grid, Direction::Right) {
            Ok(true) => { bounds.pos.x -= 1; break; }
            Ok(false) => {}
            Err(e) => { eprintln!("{e}"); return; }
        }
    }
    println!("walked to x={} ({} queries)", bounds.pos.x, collider.stats().queries);

    // Hot path: the same blocked query every frame should be answered by the memo.
    collider.reset_stats();
    let n = 1_000_000;
    let t0 = Instant::now();
    let mut blocked = 0u32;
    for _ in 0..n {
        if let Ok(true) = collider.check_collision(1, PixelBox::new(0, 16, 16, 16), &grid, Direction::Left) { blocked += 1; }
    }
    let dt = t0.elapsed().as_secs_f64();
    let s = collider.stats();
    println!("repeat_blocked: queries={} secs={:.3} throughput={:.0} q/s hits={} samples={} blocked={}",
        s.queries, dt, (n as f64 / dt), s.cache_hits, s.tile_samples, blocked);
}
