//! Benchmarks for corpus assembly performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the assembly state machine and the text normalizer
//! over synthetic annotated pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lettercorpus::{
    finalize, Assembler, AnnotatedLine, AnnotatedPage, AnnotatedParagraph, Collection,
    FinalizeOptions, NormalizerOptions, TextNormalizer,
};

/// Creates synthetic pages: one letter per page, a handful of body
/// paragraphs each.
fn create_test_pages(page_count: usize) -> Vec<AnnotatedPage> {
    (0..page_count)
        .map(|index| {
            let mut page = AnnotatedPage::new(format!("page_{:03}", index), format!("{}", index + 1));

            let mut opening = AnnotatedParagraph::new("par_1_1");
            opening.add_line(AnnotatedLine::new(
                "line_1_1",
                "TITLE",
                format!("[{}] Richard Jeake to Samuel Jeake", index + 1),
            ));
            opening.add_line(AnnotatedLine::new("line_1_2", "SALUTATION", "Deare Sonne,"));
            page.add_paragraph(opening);

            for par in 0..4 {
                let mut paragraph = AnnotatedParagraph::new(format!("par_1_{}", par + 2));
                for row in 0..6 {
                    paragraph.add_line(AnnotatedLine::new(
                        format!("line_{}_{}", par + 2, row + 1),
                        "BODY",
                        "I received yours of the 4th and am glad to heare you are well.",
                    ));
                }
                page.add_paragraph(paragraph);
            }

            let mut closing = AnnotatedParagraph::new("par_1_6");
            closing.add_line(AnnotatedLine::new(
                "line_6_1",
                "MULTI",
                "Rye, March the 4th%Richard Jeake",
            ));
            page.add_paragraph(closing);

            page
        })
        .collect()
}

/// Benchmark the assembly loop at various corpus sizes.
fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for page_count in [10, 50, 200].iter() {
        let pages = create_test_pages(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let mut assembler = Assembler::new(Collection::Jeake);
                assembler.assemble_pages(black_box(&pages));
                assembler.finish()
            });
        });
    }

    group.finish();
}

/// Benchmark full assembly plus finalization.
fn bench_finalization(c: &mut Criterion) {
    let pages = create_test_pages(50);
    let mut assembler = Assembler::new(Collection::Jeake);
    assembler.assemble_pages(&pages);
    let (letters, _) = assembler.finish();
    let profile = Collection::Jeake.profile();

    c.bench_function("finalize_50_letters", |b| {
        b.iter(|| finalize(black_box(&letters), profile, &FinalizeOptions::new()));
    });
}

/// Benchmark the normalizer on a typical letter body.
fn bench_normalizer(c: &mut Criterion) {
    let normalizer = TextNormalizer::new(NormalizerOptions::full());
    let text = "Iam glad to heare that the moncy for the jour-\nney arrived this weck, \
                and Ihave sent the picces you asked for ‘as promised’."
        .repeat(20);

    c.bench_function("normalize_letter_body", |b| {
        b.iter(|| normalizer.process(black_box(&text)));
    });
}

criterion_group!(benches, bench_assembly, bench_finalization, bench_normalizer);
criterion_main!(benches);
