#![no_main]

use hll_estimator::HyperLogLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = serde_json::from_slice::<HyperLogLog>(data) {
        assert_eq!(estimator.m(), 1 << estimator.b());
        estimator.update(1);
        assert!(estimator.estimate() > 0.0);
    }
});
