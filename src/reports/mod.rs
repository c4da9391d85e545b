use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use formforge::analysis::rules::{Direction, TieredRule};
use formforge::analysis::{FormFeedback, Movement, RepEvent};
use formforge::session::{ErrorCount, SessionReport};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn score_cell(score: f32) -> Cell {
    let text = format!("{:.0}", score);
    if score >= 90.0 {
        Cell::new(text).fg(Color::Green)
    } else if score >= 70.0 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

pub fn print_frame_report(movement: Movement, results: &[(f64, FormFeedback)]) {
    println!("\nMovement: {}", movement);
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Time").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Rep"),
        Cell::new("Errors").fg(Color::Red),
        Cell::new("Feedback"),
    ]);
    right_align(&mut table, 0..=1);

    for (timestamp, fb) in results {
        let rep = match fb.rep_completed {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };
        table.add_row(vec![
            Cell::new(format!("{:.2}", timestamp)),
            score_cell(fb.score),
            Cell::new(rep).set_alignment(CellAlignment::Center),
            Cell::new(fb.errors.join("\n")).fg(Color::Red),
            Cell::new(fb.feedback.join("\n")),
        ]);
    }
    println!("{}", table);
}

pub fn print_session_summary(report: &SessionReport) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new(format!("Session ({})", report.movement)).add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    right_align(&mut table, 1..=1);

    let rows: [(&str, String); 8] = [
        ("Frames", report.frame_count.to_string()),
        ("Evaluated", report.evaluated_frames.to_string()),
        ("Incomplete", report.incomplete_frames.to_string()),
        ("Mean score", format!("{:.1}", report.mean_score)),
        ("Min score", format!("{:.0}", report.min_score)),
        ("Max score", format!("{:.0}", report.max_score)),
        ("Rep-flagged frames", report.rep_flag_frames.to_string()),
        ("Reps counted", report.rep_count().to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("\n{}", table);
}

pub fn print_rep_report(reps: &[RepEvent]) {
    if reps.is_empty() {
        println!("\nNo complete reps detected.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rep").add_attribute(Attribute::Bold),
        Cell::new("Start"),
        Cell::new("End"),
        Cell::new("Duration"),
        Cell::new("Depth").fg(Color::Cyan),
    ]);
    right_align(&mut table, 0..=4);

    for r in reps {
        table.add_row(vec![
            Cell::new(r.rep).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", r.started_at)),
            Cell::new(format!("{:.2}", r.completed_at)),
            Cell::new(format!("{:.2}", r.completed_at - r.started_at)),
            Cell::new(format!("{:.3}", r.depth)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_error_report(errors: &[ErrorCount]) {
    if errors.is_empty() {
        println!("\nNo form errors recorded.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Error").add_attribute(Attribute::Bold),
        Cell::new("Frames").fg(Color::Red),
    ]);
    right_align(&mut table, 1..=1);

    for e in errors {
        table.add_row(vec![
            Cell::new(&e.message),
            Cell::new(e.count).fg(Color::Red),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_rules_table(movement: Movement, rules: &[TieredRule]) {
    println!("\nRules: {}", movement);
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Trigger"),
        Cell::new("Fail").fg(Color::Red),
        Cell::new("Pen"),
        Cell::new("Warn").fg(Color::Yellow),
        Cell::new("Pen"),
        Cell::new("Fail message"),
    ]);
    right_align(&mut table, 2..=5);

    for rule in rules {
        let trigger = match rule.direction {
            Direction::Below => "<",
            Direction::Above => ">",
        };
        let (warn_threshold, warn_penalty) = match rule.warn {
            Some(w) => (format!("{}", w.threshold), format!("{:.0}", w.penalty)),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(rule.metric).add_attribute(Attribute::Bold),
            Cell::new(trigger).set_alignment(CellAlignment::Center),
            Cell::new(format!("{}", rule.fail.threshold)).fg(Color::Red),
            Cell::new(format!("{:.0}", rule.fail.penalty)),
            Cell::new(warn_threshold).fg(Color::Yellow),
            Cell::new(warn_penalty),
            Cell::new(rule.fail.message),
        ]);
    }
    println!("{}", table);
}
