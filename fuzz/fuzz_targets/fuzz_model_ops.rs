#![no_main]

use arbitrary::Arbitrary;
use kvview_model::{Column, LocalStorageModel, Model, ModelRole, OrderedEntries};
use kvview_widgets::{Size, StatefulWidget, StorageTable, StorageTableState};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Set(Vec<(String, String)>),
    Clear,
    Select(Option<u8>),
    Next,
    Previous,
    Render { width: u8, height: u8 },
}

fuzz_target!(|ops: Vec<Op>| {
    let mut model = LocalStorageModel::new();
    let mut state = StorageTableState::new();
    state.attach(&model);

    for op in ops.into_iter().take(256) {
        match op {
            Op::Set(pairs) => {
                let entries: OrderedEntries = pairs.into_iter().take(64).collect();
                let expected = entries.clone();
                model.set_items(entries);
                assert_eq!(model.row_count(), expected.len());
                for (row, (key, value)) in expected.iter().enumerate() {
                    let k = model.index(row as i32, Column::Key.as_index());
                    let v = model.index(row as i32, Column::Value.as_index());
                    assert_eq!(model.data(k, ModelRole::Display).as_str(), Some(key));
                    assert_eq!(model.data(v, ModelRole::Display).as_str(), Some(value));
                }
            }
            Op::Clear => {
                model.clear_items();
                assert!(!model.index(0, 0).is_valid());
            }
            Op::Select(row) => {
                state.select(row.map(usize::from), model.row_count());
            }
            Op::Next => {
                state.next(model.row_count());
            }
            Op::Previous => {
                state.previous(model.row_count());
            }
            Op::Render { width, height } => {
                let area = Size::new(u16::from(width), u16::from(height));
                let lines = StorageTable::new(&model).render(area, &mut state);
                assert!(lines.len() <= usize::from(area.height));
                if let Some(selected) = state.selected() {
                    assert!(selected < model.row_count());
                }
            }
        }
    }
});
