#![no_main]

use hll_estimator::HyperLogLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&b, values)) = data.split_first() else {
        return;
    };

    let mut estimator = match HyperLogLog::new(b) {
        Ok(estimator) => estimator,
        Err(_) => {
            assert!(!(4..=16).contains(&b));
            return;
        }
    };

    for chunk in values.chunks_exact(4) {
        let before = estimator.registers().to_vec();
        estimator.update(u32::from_le_bytes(chunk.try_into().unwrap()));
        assert!(before
            .iter()
            .zip(estimator.registers())
            .all(|(old, new)| old <= new));
        assert!(estimator.registers().iter().all(|&r| r <= estimator.max_rank()));

        let estimate = estimator.estimate();
        assert!(estimate > 0.0);
        assert!(estimator.raw_estimate() > 0.0);
        assert!(estimator.num_zeros() < estimator.m());
    }
});
