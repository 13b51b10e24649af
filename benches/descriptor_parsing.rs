//! Benchmark for parsing large BMFont descriptors.
//!
//! Builds a synthetic CJK-sized font (several thousand glyphs) in both the XML
//! and the text form and measures `BmFont::parse` on each.

use cellfont::BmFont;
use criterion::{criterion_group, criterion_main, Criterion};
use std::fmt::Write;
use std::hint::black_box;

const GLYPHS: u32 = 7000;

fn xml_descriptor() -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\"?>\n<font>\n\
         <info face=\"bench\" size=\"8\" padding=\"0,0,0,0\" spacing=\"1,1\"/>\n\
         <common lineHeight=\"8\" base=\"7\" scaleW=\"1024\" scaleH=\"1024\" pages=\"1\"/>\n\
         <pages><page id=\"0\" file=\"bench_0.png\"/></pages>\n<chars>\n",
    );
    for i in 0..GLYPHS {
        let _ = writeln!(
            out,
            "<char id=\"{}\" x=\"{}\" y=\"{}\" width=\"8\" height=\"8\" xoffset=\"0\" yoffset=\"0\" xadvance=\"8\" page=\"0\" chnl=\"15\"/>",
            0x3000 + i,
            (i % 128) * 8,
            (i / 128) * 8
        );
    }
    out.push_str("</chars>\n</font>\n");
    out
}

fn text_descriptor() -> String {
    let mut out = String::from(
        "info face=\"bench\" size=8 padding=0,0,0,0 spacing=1,1\n\
         common lineHeight=8 base=7 scaleW=1024 scaleH=1024 pages=1\n\
         page id=0 file=\"bench_0.png\"\n",
    );
    for i in 0..GLYPHS {
        let _ = writeln!(
            out,
            "char id={} x={} y={} width=8 height=8 xoffset=0 yoffset=0 xadvance=8 page=0 chnl=15",
            0x3000 + i,
            (i % 128) * 8,
            (i / 128) * 8
        );
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let xml = xml_descriptor();
    let text = text_descriptor();

    let mut group = c.benchmark_group("descriptor");
    group.bench_function("parse_xml", |b| {
        b.iter(|| {
            let font = BmFont::parse(black_box(&xml)).unwrap();
            assert_eq!(font.glyph_count(), GLYPHS as usize);
        })
    });
    group.bench_function("parse_text", |b| {
        b.iter(|| {
            let font = BmFont::parse(black_box(&text)).unwrap();
            assert_eq!(font.glyph_count(), GLYPHS as usize);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
