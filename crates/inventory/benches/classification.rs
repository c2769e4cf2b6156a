use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use circuloop_inventory::{
    AssetAttributes, AssetUpdate, DeviceCategory, Inventory, SearchCriteria, classify,
};

fn populated(n: usize) -> Inventory {
    let mut inv = Inventory::new();
    for i in 0..n {
        let category = DeviceCategory::ALL[i % DeviceCategory::ALL.len()];
        inv.add(
            AssetAttributes::new(format!("Device {}", i % 50), "Bench", category, (i % 10) as f64)
                .with_battery_health((i % 101) as u8)
                .with_can_refurbish(i % 3 != 0)
                .with_hazardous(i % 17 == 0),
        );
    }
    inv
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_single", |b| {
        b.iter(|| {
            classify(
                black_box(false),
                black_box(4.5),
                black_box(55),
                black_box(true),
                black_box(DeviceCategory::LabEquipment),
            )
        });
    });
}

fn bench_inventory_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory_ops");

    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("search_name_status", size), &size, |b, &n| {
            let inv = populated(n);
            let criteria = SearchCriteria::new().name("Device 7").status("Dormant");
            b.iter(|| inv.search(black_box(&criteria)).len());
        });

        group.bench_with_input(BenchmarkId::new("migration_report", size), &size, |b, &n| {
            let inv = populated(n);
            b.iter(|| inv.generate_migration_report().total());
        });

        group.bench_with_input(BenchmarkId::new("update_reclassify", size), &size, |b, &n| {
            let mut inv = populated(n);
            let ids: Vec<_> = inv.assets().map(|a| a.id_typed()).collect();
            let mut i = 0usize;
            b.iter(|| {
                let id = ids[i % ids.len()];
                i += 1;
                let battery = (i % 101) as u8;
                inv.update(id, [AssetUpdate::BatteryHealth(black_box(battery))])
                    .map(|a| a.disposal_strategy())
                    .ok()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_inventory_ops);
criterion_main!(benches);
