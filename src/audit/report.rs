//! Human readable audit report.

use std::io::{
    self,
    Write,
};

use super::{
    AuditSummary,
    LocaleAudit,
    LocaleFix,
};

/// Writes the report of `summary` to `out`.
pub fn write_report(out: &mut impl Write, summary: &AuditSummary) -> io::Result<()> {
    writeln!(
        out,
        "Checking translations against {} ({} keys)",
        summary.baseline_file, summary.baseline_key_count
    )?;
    writeln!(out)?;

    for locale in &summary.locales {
        write_locale(out, locale)?;
    }

    for failure in &summary.failures {
        writeln!(out, "{}: error: {failure}", failure.locale())?;
    }

    writeln!(out)?;
    if summary.drafts_written() {
        writeln!(
            out,
            "Missing keys were added with \"{}\" values. Translate them before the next deploy.",
            summary.draft_prefix
        )?;
    }
    if summary.is_in_sync() {
        if !summary.drafts_written() {
            writeln!(out, "All translations are in sync.")?;
        }
    } else if summary.fix_mode {
        writeln!(out, "Extra or skipped keys remain and need a manual decision.")?;
    } else {
        writeln!(out, "Some differences remain. Run with --fix to add the missing keys.")?;
    }

    Ok(())
}

fn write_locale(out: &mut impl Write, locale: &LocaleAudit) -> io::Result<()> {
    let comparison = &locale.comparison;
    if comparison.is_in_sync() {
        return writeln!(out, "{}: OK ({} keys)", locale.file_name, locale.key_count);
    }

    writeln!(out, "{}:", locale.file_name)?;

    if !comparison.missing.is_empty() {
        let keys: Vec<&str> = comparison.missing.iter().map(String::as_str).collect();
        writeln!(out, "  missing ({}): {}", keys.len(), keys.join(", "))?;
    }

    match &locale.fix {
        Some(LocaleFix::Written { inserted, skipped }) => {
            if !inserted.is_empty() {
                writeln!(out, "  added ({}): {}", inserted.len(), inserted.join(", "))?;
            }
            if !skipped.is_empty() {
                writeln!(
                    out,
                    "  skipped ({}), an existing key is in the way: {}",
                    skipped.len(),
                    skipped.join(", ")
                )?;
            }
        }
        Some(LocaleFix::Failed { message }) => {
            writeln!(out, "  fix failed: {message}")?;
        }
        None => {}
    }

    if !locale.extra_locations.is_empty() {
        writeln!(out, "  extra ({}):", locale.extra_locations.len())?;
        for (key, position) in &locale.extra_locations {
            match position {
                Some(position) => writeln!(out, "    {key} ({}:{position})", locale.file_name)?,
                None => writeln!(out, "    {key}")?,
            }
        }
    }

    Ok(())
}
