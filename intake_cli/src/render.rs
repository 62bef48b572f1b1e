//! Human-readable and JSON output for the desk.

use intake_core::{IntakeStats, JournalEntry, PatientRecord, PriorityClass, Result};

pub fn record_line(record: &PatientRecord) -> String {
    format!(
        "#{:<5} {:<25} age {:>3}  [{}]",
        record.id(),
        record.name(),
        record.age(),
        record.priority().label()
    )
}

pub fn print_records<'a>(
    title: &str,
    records: impl Iterator<Item = &'a PatientRecord>,
    json: bool,
) -> Result<()> {
    let records: Vec<&PatientRecord> = records.collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} is empty.", title);
        return Ok(());
    }

    println!("{} ({}):", title, records.len());
    for (i, record) in records.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, record_line(record));
    }
    Ok(())
}

pub fn print_stats(stats: &IntakeStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("Statistics:");
    println!("  Registered:        {}", stats.total_registered);
    println!("  Served:            {}", stats.total_served);
    println!("  Undone:            {}", stats.total_undone);
    println!("  Currently waiting: {}", stats.currently_waiting);
    for priority in PriorityClass::ALL {
        println!(
            "    {:<10} {}",
            priority.label(),
            stats.waiting_by_priority.get(priority)
        );
    }
    Ok(())
}

pub fn print_journal(entries: &[JournalEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Activity log is empty.");
        return Ok(());
    }

    println!("Activity log ({}):", entries.len());
    for entry in entries {
        println!(
            "  {:>4}  {}  {:<10} patient #{} [{}]",
            entry.sequence,
            entry.at.format("%H:%M:%S"),
            format!("{:?}", entry.kind).to_lowercase(),
            entry.patient_id,
            entry.priority.label()
        );
    }
    Ok(())
}
