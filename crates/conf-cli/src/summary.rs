//! Terminal rendering of manifest lists and session views.

use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use conf_model::{ManifestItem, ManifestStatus, ManifestSummary, Quantity};
use conf_session::ConferenceSession;

/// Weights are printed the way they appear on the paper manifest: comma
/// decimals, kg suffix.
pub fn format_weight(value: f64) -> String {
    format!("{value} kg").replace('.', ",")
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn status_cell(status: &ManifestStatus) -> Cell {
    match status {
        ManifestStatus::Pending => Cell::new("pending").fg(Color::Yellow),
        ManifestStatus::InConference { owner } => {
            Cell::new(format!("in conference ({})", owner.user_name)).fg(Color::Magenta)
        }
        ManifestStatus::Completed => Cell::new("completed")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_manifest_list(date: NaiveDate, summaries: &[ManifestSummary]) {
    if summaries.is_empty() {
        println!("No manifests scheduled for {date}.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Manifest"),
        header_cell("Driver"),
        header_cell("Vehicle"),
        header_cell("Plate"),
        header_cell("Weight"),
        header_cell("Pallets"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(format!("#{}", summary.id)).add_attribute(Attribute::Bold),
            Cell::new(&summary.driver),
            Cell::new(&summary.vehicle),
            Cell::new(&summary.plate),
            Cell::new(format_weight(summary.declared_weight)),
            Cell::new(summary.declared_pallet_count),
            status_cell(&summary.status),
        ]);
    }
    println!("Manifests for {date}:");
    println!("{table}");
}

fn print_summary_card(summary: &ManifestSummary) {
    println!("Manifest #{}  ({})", summary.id, summary.date);
    println!("Driver:  {}", summary.driver);
    println!("Vehicle: {}", summary.vehicle);
    if let Some(owner) = summary.status.owner() {
        println!("IN CONFERENCE - {owner}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Plate"),
        header_cell("Total weight"),
        header_cell("Pallets"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(&summary.plate),
        Cell::new(format_weight(summary.declared_weight)),
        Cell::new(summary.declared_pallet_count),
        status_cell(&summary.status),
    ]);
    println!("{table}");
}

fn print_item_section(title: &str, items: &[ManifestItem]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Code"),
        header_cell("DUN"),
        header_cell("Description"),
        header_cell("EAN"),
        header_cell("Qty"),
        header_cell("Unit"),
        header_cell("Weight"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for item in items {
        table.add_row(vec![
            Cell::new(item.id.as_str()),
            Cell::new(&item.product_code),
            Cell::new(&item.short_barcode),
            Cell::new(&item.description),
            Cell::new(&item.reference),
            Cell::new(item.expected_quantity.to_comma_string()),
            Cell::new(&item.unit),
            Cell::new(format_weight(item.declared_weight)),
        ]);
    }
    println!("{table}");
}

fn print_confirmed_section(items: &[ManifestItem]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("Confirmed:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Declared"),
        header_cell("Counted"),
        header_cell("Note"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for item in items {
        let counted = item
            .confirmed_quantity()
            .map(Quantity::to_comma_string)
            .unwrap_or_else(|| "-".to_string());
        let counted_cell = if item.confirmed_quantity() == Some(&item.expected_quantity) {
            Cell::new(counted).fg(Color::Green)
        } else {
            Cell::new(counted).fg(Color::Yellow).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(item.id.as_str()),
            Cell::new(&item.product_code),
            Cell::new(&item.description),
            Cell::new(item.expected_quantity.to_comma_string()),
            counted_cell,
            Cell::new(item.divergence_note().unwrap_or("-")),
        ]);
    }
    println!("{table}");
}

/// Render one item the way the conference prompt shows it.
pub fn print_item_card(item: &ManifestItem) {
    println!("{}", item.description);
    println!(
        "Code {}  DUN {}  EAN {}",
        item.product_code, item.short_barcode, item.reference
    );
    println!(
        "Quantity to verify: {} {}",
        item.expected_quantity.to_comma_string(),
        item.unit
    );
}

pub fn print_session(session: &ConferenceSession) {
    match session.summary() {
        Some(summary) => print_summary_card(&summary),
        None => {
            let manifest = session.manifest();
            println!(
                "Manifest #{} - conference in progress, you hold the lock.",
                manifest.id
            );
        }
    }

    if session.is_search_active() {
        println!();
        println!(
            "Search \"{}\" - confirmed items hidden while searching.",
            session.query()
        );
    }

    print_item_section("Own invoices", session.own_pending());
    print_item_section("Third-party invoices", session.third_party_pending());
    print_confirmed_section(session.confirmed_items());

    println!();
    let manifest = session.manifest();
    if manifest.status == ManifestStatus::Completed {
        println!("Conference completed.");
    } else if session.finish_eligible() {
        println!("All items confirmed - ready to finish.");
    } else {
        println!(
            "{} of {} item(s) confirmed.",
            manifest.confirmed_count(),
            manifest.items.len()
        );
    }
}
