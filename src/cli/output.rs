//! Output formatting for the CLI

use crate::{game::SessionStats, q_learning::QTable};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print win/loss totals for a session
pub fn print_session_summary(stats: &SessionStats) {
    print_section("Session summary");
    print_kv("Games", &format_number(stats.games));
    print_kv("Agent wins", &stats.agent_wins.to_string());
    print_kv("Human wins", &stats.human_wins.to_string());
    print_kv("Round limit", &stats.round_limits.to_string());
    print_kv("Agent blocked", &stats.agent_blocked.to_string());
    print_kv("Agent win rate", &format_percent(stats.agent_win_rate()));
}

/// Number of distinct board states with at least one stored value
pub fn distinct_states(table: &QTable) -> usize {
    let mut states: Vec<_> = table.iter().map(|(state, _, _)| *state).collect();
    states.sort();
    states.dedup();
    states.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::{Action, Board};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.25), "25.0%");
    }

    #[test]
    fn test_distinct_states() {
        let mut table = QTable::default();
        let state = Board::initial().state_key();
        table.set(state, Action::new(0, 0, 1, 1), 1.0);
        table.set(state, Action::new(0, 2, 1, 3), 1.0);
        assert_eq!(distinct_states(&table), 1);
    }
}
