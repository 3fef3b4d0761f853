use colored::*;
use ouidb_common::network::record::Record;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 12;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{}", line);
}

pub fn fat_separator() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().cyan());
    println!("{} {}", idx_str.bright_black(), name.bright_green());
}

pub fn as_tree_one_level(key_value_pair: &[(String, ColoredString)]) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        println!(
            " {} {}{}{} {}",
            branch,
            key,
            ".".repeat(KEY_WIDTH.saturating_sub(key.len())).bright_black(),
            ":".bright_black(),
            value
        );
    }
}

/// Key/value lines describing a record, in tree order.
pub fn record_to_details(record: &Record) -> Vec<(String, ColoredString)> {
    let mut details: Vec<(String, ColoredString)> =
        vec![("Prefix".to_string(), record.prefix().to_string().yellow())];

    for line in record.address() {
        details.push(("Address".to_string(), line.normal()));
    }
    if !record.country().is_empty() {
        details.push(("Country".to_string(), record.country().bold()));
    }
    if record.is_local() {
        details.push(("Segment".to_string(), "Locally Administered".magenta()));
    }
    if record.is_multicast() {
        details.push(("Segment".to_string(), "Multicast".magenta()));
    }
    details
}

pub fn record_tree(idx: usize, record: &Record) {
    tree_head(idx, record.manufacturer());
    as_tree_one_level(&record_to_details(record));
}

pub fn not_found(idx: usize, mac: &str) {
    tree_head(idx, mac);
    as_tree_one_level(&[("Manufacturer".to_string(), "Not found".red().bold())]);
}
