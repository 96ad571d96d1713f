#[test]
fn init_can_be_called_repeatedly() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("screenkey.log");

    screenkey::logging::init(false, None);
    screenkey::logging::init(true, None);
    screenkey::logging::init(false, Some(&log_path));
    tracing::info!("logger survives repeated initialisation");
}
