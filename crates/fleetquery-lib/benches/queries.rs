use criterion::{criterion_group, criterion_main, Criterion};
use fleetquery_lib::{
    load_vehicles, DefaultVehicleService, SearchQuery, VehicleService, VehicleStoreRepository,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/vehicles.json")
}

static SERVICE: Lazy<DefaultVehicleService> = Lazy::new(|| {
    let store = load_vehicles(&fixture_path()).expect("fixture loads");
    DefaultVehicleService::new(Arc::new(VehicleStoreRepository::new(store)))
});

fn benchmark_queries(c: &mut Criterion) {
    let service = &*SERVICE;

    c.bench_function("color_and_year_red_2010", |b| {
        b.iter(|| {
            let found = service.find_by_color_and_year("Red", 2010).expect("query runs");
            black_box(found.len())
        });
    });

    c.bench_function("brand_year_range_chevrolet", |b| {
        b.iter(|| {
            let found = service
                .find_by_brand_and_year_range("Chevrolet", 2015, 2025)
                .expect("query runs");
            black_box(found.len())
        });
    });

    c.bench_function("average_max_speed_chevrolet", |b| {
        b.iter(|| black_box(service.average_max_speed_by_brand("Chevrolet").expect("brand exists")));
    });

    c.bench_function("weight_range_filtered", |b| {
        let query = SearchQuery::new(1000.0, 1500.0);
        b.iter(|| {
            let found = service.search_by_weight_range(query, true).expect("query runs");
            black_box(found.len())
        });
    });
}

criterion_group!(benches, benchmark_queries);
criterion_main!(benches);
