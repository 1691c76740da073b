use serde_json::json;
use evalchain_core::{Message, ToolCall, Trajectory};
use evalchain_metrics::{AgentSample, MetricError, ToolCallF1};

fn trajectory_with_calls(calls: Vec<ToolCall>) -> Trajectory {
    let mut trajectory = Trajectory::new();
    trajectory.push(Message::human("please do the thing"));
    for call in calls {
        trajectory.push(Message::assistant_with_tools("on it", vec![call]));
    }
    trajectory
}

#[test]
fn identical_lists_score_one() {
    let calls = vec![
        ToolCall::new("restaurant_search", json!({"cuisine": "Chinese", "time": "8:00pm"})),
        ToolCall::new("restaurant_book", json!({"name": "Golden Dragon", "time": "8:00pm"})),
    ];
    let sample =
        AgentSample::new(trajectory_with_calls(calls.clone())).with_reference_tool_calls(calls);

    let score = ToolCallF1::new().score(&sample).expect("score");

    assert_eq!(score.value, 1.0);
}

#[test]
fn zero_candidate_calls_score_zero() {
    let trajectory = Trajectory::from(vec![
        Message::human("book me a table"),
        Message::assistant("I could not find anything."),
    ]);
    let sample = AgentSample::new(trajectory).with_reference_tool_calls(vec![ToolCall::new(
        "restaurant_book",
        json!({"name": "Golden Dragon"}),
    )]);

    let score = ToolCallF1::new().score(&sample).expect("score");

    assert_eq!(score.value, 0.0);
}

#[test]
fn one_match_one_extra_one_missing_halves_everything() {
    // 2 candidate calls, 2 reference calls, exactly one exact match:
    // precision = recall = f1 = 0.5.
    let candidate = vec![
        ToolCall::new("weather_check", json!({"location": "New York"})),
        ToolCall::new("uv_index_lookup", json!({"location": "New York"})),
    ];
    let reference = vec![
        ToolCall::new("weather_check", json!({"location": "New York"})),
        ToolCall::new("temperature_conversion", json!({"temperature_fahrenheit": 75})),
    ];
    let sample =
        AgentSample::new(trajectory_with_calls(candidate)).with_reference_tool_calls(reference);

    let score = ToolCallF1::new().score(&sample).expect("score");

    assert_eq!(score.value, 0.5);
}

#[test]
fn f1_is_order_independent() {
    let forward = vec![
        ToolCall::new("a", json!({"k": 1})),
        ToolCall::new("b", json!({"k": 2})),
    ];
    let backward: Vec<_> = forward.iter().cloned().rev().collect();

    let sample_forward = AgentSample::new(trajectory_with_calls(forward.clone()))
        .with_reference_tool_calls(forward.clone());
    let sample_backward =
        AgentSample::new(trajectory_with_calls(backward)).with_reference_tool_calls(forward);

    let one = ToolCallF1::new().score(&sample_forward).expect("score");
    let two = ToolCallF1::new().score(&sample_backward).expect("score");

    assert_eq!(one.value, two.value);
}

#[test]
fn duplicate_calls_pair_at_most_once() {
    let candidate = vec![
        ToolCall::new("weather_check", json!({"location": "New York"})),
        ToolCall::new("weather_check", json!({"location": "New York"})),
    ];
    let reference = vec![ToolCall::new("weather_check", json!({"location": "New York"}))];
    let sample =
        AgentSample::new(trajectory_with_calls(candidate)).with_reference_tool_calls(reference);

    let score = ToolCallF1::new().score(&sample).expect("score");

    // precision 1/2, recall 1/1 -> f1 = 2/3
    assert!((score.value - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn missing_reference_is_an_error() {
    let sample = AgentSample::new(trajectory_with_calls(vec![ToolCall::new(
        "weather_check",
        json!({}),
    )]));

    assert!(matches!(
        ToolCallF1::new().score(&sample),
        Err(MetricError::MissingReference("reference_tool_calls"))
    ));
}
