// ABOUTME: Display helpers for monetary amounts
// Rounding only happens here, never in the cost computations

/// Format cost as USD string
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("${:.4}", cost)
    } else {
        format!("${:.2}", cost)
    }
}
