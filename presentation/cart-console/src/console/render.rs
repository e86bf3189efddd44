use bigdecimal::BigDecimal;
use business::domain::cart::model::CartSnapshot;

fn money(amount: &BigDecimal) -> String {
    amount.with_scale(2).to_string()
}

/// Renders the snapshot as a plain-text table followed by the summary line.
pub fn render(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = format!(
        "{:<3} {:>6}  {:<32} {:>4} {:>10} {:>10}\n",
        "", "LINE", "TITLE", "QTY", "UNIT", "TOTAL"
    );
    for line in &snapshot.lines {
        let mark = if snapshot.is_selected(line.id) { "[x]" } else { "[ ]" };
        let stock = match line.stock {
            Some(0) => " (out of stock)".to_string(),
            Some(stock) if stock < line.quantity => format!(" (only {} left)", stock),
            _ => String::new(),
        };
        out.push_str(&format!(
            "{:<3} {:>6}  {:<32} {:>4} {:>10} {:>10}{}\n",
            mark,
            line.id,
            line.product_name,
            line.quantity,
            money(&line.unit_price),
            money(&line.total_price),
            stock
        ));
    }

    let summary = snapshot.summary();
    out.push_str(&format!(
        "{} items, subtotal {}, selected {}",
        summary.item_count,
        money(&summary.subtotal),
        money(&summary.selected_subtotal)
    ));
    out
}
