//! Add, search and display command handlers.

use datarec::config::RecorderConfig;
use datarec::models::{RawRecord, Record, RecordField};
use datarec::services::{AddService, SearchService};
use datarec::storage::JsonFileStore;
use datarec::Result;

use super::print_warnings;

/// Executes the add command.
pub fn cmd_add(
    config: &RecorderConfig,
    id: String,
    name: String,
    address: String,
    phone: String,
) -> Result<()> {
    let service = AddService::from_config(config);
    println!(
        "Currently, there are [{}] slots left in the store.",
        service.remaining()?
    );

    let result = service.add(vec![RawRecord::new(id, name, address, phone)])?;
    println!("Added {} record(s).", result.added);

    let mut warnings = result.rejected;
    warnings.extend(
        result
            .duplicate_ids
            .iter()
            .map(|id| format!("Duplicate ID {id} skipped")),
    );
    print_warnings(&warnings);
    Ok(())
}

/// Executes the search command.
pub fn cmd_search(config: &RecorderConfig, field: &str, value: &str) -> Result<()> {
    let service = SearchService::from_config(config);
    let matches = service.search_field(field, value)?;

    println!("Searching for {value} amongst {field} in entries...");
    if matches.is_empty() {
        println!("No entries with [{value}] in [{field}].");
    } else {
        println!("Here are the matching entries with [{value}] in [{field}]:");
        print!("{}", format_table(&matches));
    }
    Ok(())
}

/// Executes the display command.
pub fn cmd_display(config: &RecorderConfig) -> Result<()> {
    let doc = JsonFileStore::from_config(config).load_all()?;
    if doc.is_empty() {
        println!("The store is empty.");
    } else {
        print!("{}", format_table(&doc.data_records));
        println!("{} record(s).", doc.len());
    }
    Ok(())
}

/// Renders records as a plain-text table, one line per record.
#[must_use]
pub fn format_table(records: &[Record]) -> String {
    let headers = RecordField::names();
    let mut widths = headers.map(str::len);
    for record in records {
        for (width, value) in widths.iter_mut().zip(record.values()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers, widths);
    push_row(&mut out, widths.map(|w| "-".repeat(w)).each_ref().map(String::as_str), widths);
    for record in records {
        push_row(&mut out, record.values(), widths);
    }
    out
}

fn push_row(out: &mut String, cells: [&str; 4], widths: [usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let records = vec![
            Record::new("1", "Anne Rice", "23 Vampire Ave", "66666666"),
            Record::new("56", "Becky", "Block 25", "3655"),
        ];
        let table = format_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id  name       address         phone");
        assert_eq!(lines[1], "--  ---------  --------------  --------");
        assert_eq!(lines[2], "1   Anne Rice  23 Vampire Ave  66666666");
        assert_eq!(lines[3], "56  Becky      Block 25        3655");
    }
}
