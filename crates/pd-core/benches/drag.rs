use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pd_core::{MemoryStatePort, OverlayEngine, Surface};

struct NullSurface;

impl Surface for NullSurface {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
    fn move_to(&mut self, x: f64, y: f64) {
        black_box((x, y));
    }
    fn resize_to(&mut self, _edge_px: u32) {}
    fn set_alpha(&mut self, _alpha: f64) {}
}

fn bench_drag_move(c: &mut Criterion) {
    let mut engine = OverlayEngine::start(MemoryStatePort::new(), NullSurface, 2.75);
    engine.begin_drag(100.0, 100.0).unwrap();

    let mut i = 0u32;
    c.bench_function("on_drag_move", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            let t = f64::from(i % 1000);
            engine.on_drag_move(black_box(100.0 + t), black_box(100.0 + t))
        })
    });
}

fn bench_full_gesture(c: &mut Criterion) {
    c.bench_function("drag_gesture_60_moves", |b| {
        let mut engine = OverlayEngine::start(MemoryStatePort::new(), NullSurface, 2.75);
        b.iter(|| {
            engine.begin_drag(0.0, 0.0).unwrap();
            for step in 0..60 {
                let t = f64::from(step) * 7.5;
                engine.on_drag_move(t, t * 1.5).unwrap();
            }
            engine.end_drag(1080, 2340).unwrap()
        })
    });
}

criterion_group!(benches, bench_drag_move, bench_full_gesture);
criterion_main!(benches);
