use serde_json::json;
use evalchain_core::{Message, Role, ToolCall, Trajectory};

fn booking_trajectory() -> Trajectory {
    Trajectory::from(vec![
        Message::human("Book a table at best Chinese restaurant for 8:00pm"),
        Message::assistant_with_tools(
            "Sure, I will search the best Chinese restaurants near you.",
            vec![ToolCall::new(
                "restaurant_search",
                json!({"cuisine": "Chinese", "time": "8:00pm"}),
            )],
        ),
        Message::tool("Found: Golden Dragon, Jade Palace"),
        Message::assistant_with_tools(
            "Okay, booking Golden Dragon for 8:00pm now.",
            vec![ToolCall::new(
                "restaurant_book",
                json!({"name": "Golden Dragon", "time": "8:00pm"}),
            )],
        ),
        Message::tool("Table booked at Golden Dragon for 8:00pm."),
    ])
}

#[test]
fn tool_calls_flatten_assistant_turns_in_order() {
    let trajectory = booking_trajectory();

    let calls = trajectory.tool_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].name, "restaurant_search");
    assert_eq!(calls[1].name, "restaurant_book");
}

#[test]
fn tool_calls_ignore_non_assistant_turns() {
    let trajectory = Trajectory::from(vec![
        Message::human("hi"),
        Message::tool("tool output"),
        Message::assistant("no tools here"),
    ]);

    assert!(trajectory.tool_calls().is_empty());
}

#[test]
fn push_appends_in_order() {
    let mut trajectory = Trajectory::new();
    assert!(trajectory.is_empty());

    trajectory.push(Message::human("hello"));
    trajectory.push(Message::assistant("hi there"));

    assert_eq!(trajectory.len(), 2);
    assert_eq!(trajectory.messages()[0].role, Role::User);
    assert_eq!(trajectory.messages()[1].role, Role::Assistant);
}

#[test]
fn transcript_renders_roles_and_tool_calls() {
    let transcript = booking_trajectory().transcript();

    assert!(transcript.starts_with("user: Book a table"));
    assert!(transcript.contains("assistant: Sure, I will search"));
    assert!(transcript.contains("[tool call] restaurant_search("));
    assert!(transcript.contains("tool: Found: Golden Dragon, Jade Palace"));
}

#[test]
fn trajectory_round_trips_through_serde() {
    let trajectory = booking_trajectory();
    let value = serde_json::to_value(&trajectory).expect("serialize trajectory");
    let back: Trajectory = serde_json::from_value(value).expect("deserialize trajectory");

    assert_eq!(back, trajectory);
}
