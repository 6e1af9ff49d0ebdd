use crate::todo::{Priority, TodoItem};

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// One-line suggestion for what to focus on, based on open todos.
pub fn daily_focus(todos: &[TodoItem]) -> String {
    let open: Vec<&TodoItem> = todos.iter().filter(|t| !t.is_completed()).collect();
    let high = open.iter().filter(|t| t.priority == Priority::High).count();

    if high > 0 {
        format!("Focus on {} high-priority task{} today", high, plural(high))
    } else if open.len() > 3 {
        "Break down your tasks into smaller chunks for better focus".to_string()
    } else if !open.is_empty() {
        format!(
            "Complete {} remaining task{} to finish strong",
            open.len(),
            plural(open.len())
        )
    } else {
        "Great job! All tasks completed. Time to plan tomorrow".to_string()
    }
}
