use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgdesk::stmt::{self, AggregateFunc, Case, StatementBuilder, WithStatement};

/// SELECT with `n` literal predicates plus a join, grouping and ordering.
fn build_statement(n: usize) -> StatementBuilder {
    let mut qb = stmt::select("orders o")
        .select(&["o.region", "c.tier"])
        .aggregate("o.amount", AggregateFunc::Sum)
        .inner_join("customers c", "c.id = o.customer_id")
        .group_by(&["o.region", "c.tier"])
        .order_by_desc(&["o.region"])
        .limit(100);
    for i in 0..n {
        qb = qb.where_gt(&format!("o.col{i}"), &i.to_string());
    }
    qb
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/build");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_statement(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.build()));
        });
    }

    group.finish();
}

fn bench_bound_params(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/build_with_params");

    for n in [5, 20, 100] {
        let mut qb = stmt::select("events");
        for i in 0..n {
            qb = qb.where_bind(&format!("c{i}"), "=", i as i64);
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.build_with_params()));
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    c.bench_function("statement/cte_with_subqueries", |b| {
        b.iter(|| {
            let sub = stmt::select("refunds r")
                .select(&["1"])
                .where_raw("r.order_id = o.id")
                .where_bind("r.amount", ">", 0i32);
            let main = stmt::select("recent o")
                .select_case(
                    &Case::new()
                        .when("o.amount > 1000", "'large'")
                        .otherwise("'small'"),
                    "size",
                )
                .where_not_exists(sub);
            let with = WithStatement::new(main).cte_builder(
                "recent",
                stmt::select("orders").where_bind("created_at", ">", "2024-01-01".to_string()),
            );
            black_box(with.build_with_params())
        });
    });
}

criterion_group!(benches, bench_build, bench_bound_params, bench_nested);
criterion_main!(benches);
