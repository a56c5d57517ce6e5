use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cribbage_engine::cards::{parse_cards, Card, DECK_SIZE};
use cribbage_engine::scoring::hand_points;
use cribbage_engine::strategy::best_discard;

fn all_cards() -> Vec<Card> {
    (0..DECK_SIZE as u8).filter_map(Card::from_index).collect()
}

fn bench_hand_points(c: &mut Criterion) {
    let hand = parse_cards("5h 5c 5s Jd").unwrap();
    let cuts = all_cards();

    c.bench_function("hand_points_every_cut", |b| {
        b.iter(|| {
            for &cut in &cuts {
                black_box(hand_points(black_box(cut), black_box(&hand)));
            }
        })
    });
}

fn bench_best_discard(c: &mut Criterion) {
    let mut g = c.benchmark_group("best_discard");
    for (label, hand) in [
        ("six_cards", "5h 5c 5s Jd Kc 2s"),
        ("five_cards", "As 4h 7c 9d Qs"),
    ] {
        let hand = parse_cards(hand).unwrap();
        g.bench_with_input(BenchmarkId::new("deal", label), &hand, |b, h| {
            b.iter(|| black_box(best_discard(black_box(h), true)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_hand_points, bench_best_discard);
criterion_main!(benches);
