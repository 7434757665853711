use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use physalia_align::MoleculeClass;
use physalia_struct::{align_and_superpose, superpose_points, Point3D, Residue};

const AA: &[u8] = b"ARNDCQEGHILKMFPSTWYV";

fn next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

fn random_structure(len: usize, seed: u64) -> Vec<Residue> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            let aa = AA[(next(&mut state) % AA.len() as u64) as usize];
            let x = i as f64 * 3.8 + (next(&mut state) % 100) as f64 / 100.0;
            let y = (next(&mut state) % 200) as f64 / 10.0;
            let z = (next(&mut state) % 200) as f64 / 10.0;
            Residue::new((aa as char).to_string(), i as i32 + 1, Some(Point3D::new(x, y, z)))
        })
        .collect()
}

fn perturb(residues: &[Residue], seed: u64) -> Vec<Residue> {
    let mut state = seed;
    residues
        .iter()
        .map(|r| {
            let mut out = r.clone();
            // Drop ~2% of representative atoms and jitter the rest
            if next(&mut state) % 50 == 0 {
                out.coord = None;
            } else if let Some(p) = out.coord {
                let dx = (next(&mut state) % 100) as f64 / 1000.0;
                out.coord = Some(p.add(&Point3D::new(dx, -dx, dx)));
            }
            out
        })
        .collect()
}

fn bench_superpose_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("superpose_points");
    for len in [50usize, 500, 5000] {
        let a: Vec<Point3D> = random_structure(len, 7)
            .iter()
            .filter_map(|r| r.coord)
            .collect();
        let b: Vec<Point3D> = a.iter().map(|p| p.add(&Point3D::new(1.0, 2.0, 3.0))).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
            bench.iter(|| superpose_points(black_box(&a), black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn bench_align_and_superpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_and_superpose");
    for len in [50usize, 200, 500] {
        let a = random_structure(len, 11);
        let b = perturb(&a, 13);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
            bench.iter(|| {
                align_and_superpose(black_box(&a), black_box(&b), MoleculeClass::Protein).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_superpose_points, bench_align_and_superpose);
criterion_main!(benches);
