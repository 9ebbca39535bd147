use hll_estimator::HyperLogLog;
use wyhash::wyhash;

fn main() {
    stderrlog::new()
        .verbosity(3)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    let b = std::env::args()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(12);
    let mut estimator = match HyperLogLog::new(b) {
        Ok(estimator) => estimator,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    for n in [10u64, 1_000, 100_000, 1_000_000] {
        let mut hll = estimator.clone();
        hll.extend((0..n).map(|i| wyhash(&i.to_le_bytes(), 0) as u32));
        println!(
            "n = {:>9}, estimate = {:>12.1}, raw = {:>12.1}, zeros = {:>5}, expected error = {:.4}",
            n,
            hll.estimate(),
            hll.raw_estimate(),
            hll.num_zeros(),
            hll.standard_error()
        );
    }

    // Repeated values don't change the estimate.
    for _ in 0..3 {
        estimator.extend((0..10u64).map(|i| wyhash(&i.to_le_bytes(), 0) as u32));
    }
    println!("estimator = {:?}", estimator);
}
