#![no_main]

use kvview_model::{LocalStorageModel, Model, OrderedEntries, SnapshotOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for strict in [false, true] {
        for coerce_scalars in [false, true] {
            let options = SnapshotOptions {
                strict,
                coerce_scalars,
            };
            if let Ok(entries) = OrderedEntries::from_json_str(text, &options) {
                let mut model = LocalStorageModel::new();
                let expected = entries.len();
                model.set_items(entries);
                assert_eq!(model.row_count(), expected);
            }
        }
    }
});
