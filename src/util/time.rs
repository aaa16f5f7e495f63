/// Local wall-clock stamp for file names, e.g. `20250114-093005`
pub fn file_stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}
