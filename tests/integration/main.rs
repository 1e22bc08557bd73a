// 統合テストのエントリーポイント

mod common;
mod test_end_to_end;
mod test_error_handling;
