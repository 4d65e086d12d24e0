use coal_par::parse;
use coal_util::{FileId, Handler};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SAMPLE: &str = r#"
fn main() {
    var total: int = 0
    var i: int = 0
    while (i < 100) {
        if (i % 2 == 0) {
            total += i * 2
        } elif (i % 3 == 0) {
            total += i
        } else {
            total = total - 1
        }
        i += 1
    }
    println(total.toString())
}
"#;

fn bench_parse_sample(c: &mut Criterion) {
    c.bench_function("parse_sample_program", |b| {
        b.iter(|| {
            let handler = Handler::new();
            let program = parse(black_box(SAMPLE), FileId::DUMMY, &handler);
            black_box(program.decls.len())
        })
    });
}

criterion_group!(benches, bench_parse_sample);
criterion_main!(benches);
