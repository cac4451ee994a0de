use criterion::{Criterion, black_box, criterion_group, criterion_main};
use reelpack_core::analysis::analyze;
use reelpack_core::parser::FilenameParser;
use reelpack_core::types::{EpisodeId, EpisodeRecord};

fn bench_filename_parse(c: &mut Criterion) {
    let parser = FilenameParser::new().unwrap();

    let inputs = vec![
        "Breaking.Bad.S05E14.1080p.BluRay.x264.mkv",
        "[SubsPlease] Jujutsu Kaisen - 24 (1080p).mkv",
        "权力的游戏 第3季 第09集.mp4",
        "The.Office.US.Season 2 Ep04.avi",
        "Inception.2010.2160p.HDR.mkv",
    ];

    c.bench_function("filename_parse_single", |b| {
        b.iter(|| parser.parse(black_box(inputs[0])));
    });

    c.bench_function("filename_parse_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = parser.parse(black_box(input));
            }
        });
    });
}

fn bench_range_analysis(c: &mut Criterion) {
    let records: Vec<EpisodeRecord> = (1..=3u32)
        .flat_map(|season| {
            (1..=24u32).filter(|ep| ep % 7 != 0).map(move |ep| {
                EpisodeRecord::new(
                    format!("/media/Show/S{season:02}E{ep:02}.mkv"),
                    EpisodeId {
                        season,
                        episode: Some(ep),
                    },
                )
            })
        })
        .collect();

    c.bench_function("analyze_three_seasons", |b| {
        b.iter(|| analyze(black_box(&records)));
    });
}

criterion_group!(benches, bench_filename_parse, bench_range_analysis);
criterion_main!(benches);
