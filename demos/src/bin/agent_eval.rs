use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use evalchain_core::{ChatModel, Message, ToolCall, Trajectory};
use evalchain_llm::OpenAiChat;
use evalchain_metrics::{
    AgentGoalAccuracyWithReference, AgentGoalAccuracyWithoutReference, AgentSample,
    ToolCallAccuracy, ToolCallF1, TopicAdherence, TopicAdherenceMode,
};

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
        Message::assistant("I found Golden Dragon and Jade Palace. Which one should I book?"),
        Message::human("Golden Dragon"),
        Message::assistant_with_tools(
            "Okay, booking Golden Dragon for 8:00pm now.",
            vec![ToolCall::new(
                "restaurant_book",
                json!({"name": "Golden Dragon", "time": "8:00pm"}),
            )],
        ),
        Message::tool("Table booked at Golden Dragon for 8:00pm."),
        Message::assistant("Confirmed! Your table is booked at Golden Dragon for 8:00pm."),
        Message::human("thanks"),
    ])
}

fn weather_trajectory() -> Trajectory {
    Trajectory::from(vec![
        Message::human("What's the weather like in New York right now?"),
        Message::assistant_with_tools(
            "The current temperature in New York is 75\u{b0}F and it's partly cloudy.",
            vec![ToolCall::new("weather_check", json!({"location": "New York"}))],
        ),
        Message::human("Can you translate that to Celsius?"),
        Message::assistant_with_tools(
            "Let me convert that to Celsius for you.",
            vec![ToolCall::new(
                "temperature_conversion",
                json!({"temperature_fahrenheit": 75}),
            )],
        ),
        Message::assistant_with_tools(
            "Sure, here's the UV index and air quality for New York.",
            vec![ToolCall::new("uv_index_lookup", json!({"location": "New York"}))],
        ),
    ])
}

fn topic_trajectory() -> Trajectory {
    Trajectory::from(vec![
        Message::human("Can you provide me with details about Einstein's theory of relativity?"),
        Message::assistant_with_tools(
            "Sure, let me retrieve the relevant information for you.",
            vec![ToolCall::new(
                "document_search",
                json!({"query": "Einstein's theory of relativity"}),
            )],
        ),
        Message::tool(
            "Found relevant documents: 1. Relativity: The Special and the General Theory, \
             2. General Theory of Relativity by A. Einstein.",
        ),
        Message::assistant(
            "I found some documents on Einstein's theory of relativity. Which one would you \
             like to know more about?",
        ),
        Message::human("Tell me about the 'General Theory of Relativity'."),
        Message::assistant(
            "The 'General Theory of Relativity' explains how gravity affects the fabric of \
             spacetime and the relationship between mass and spacetime curvature.",
        ),
        Message::human("No, that's perfect. By the way, do you know any good recipes for a chocolate cake?"),
        Message::assistant_with_tools(
            "Sure! Let me find a simple and delicious recipe for a chocolate cake.",
            vec![ToolCall::new("recipe_search", json!({"query": "chocolate cake recipe"}))],
        ),
        Message::tool(
            "Here's a popular recipe for a chocolate cake: mix dry ingredients, add wet \
             ingredients, and bake at 350\u{b0}F for 30-35 minutes.",
        ),
        Message::assistant(
            "I found a great recipe for chocolate cake! Would you like the full details?",
        ),
    ])
}

async fn evaluate_booking(judge: Arc<dyn ChatModel>) -> Result<()> {
    let sample = AgentSample::new(booking_trajectory())
        .with_reference_tool_calls(vec![
            ToolCall::new(
                "restaurant_search",
                json!({"cuisine": "Chinese", "time": "8:00pm"}),
            ),
            ToolCall::new(
                "restaurant_book",
                json!({"name": "Golden Dragon", "time": "8:00pm"}),
            ),
        ])
        .with_reference_goal("A table is booked at a Golden Dragon restaurant for 8:00pm");

    let accuracy = ToolCallAccuracy::new().score(&sample)?;
    let f1 = ToolCallF1::new().score(&sample)?;
    let goal_with_reference = AgentGoalAccuracyWithReference::new(judge.clone())
        .score(&sample)
        .await?;
    let goal_without_reference = AgentGoalAccuracyWithoutReference::new(judge)
        .score(&sample)
        .await?;

    println!("\nRestaurant booking metrics:");
    println!("tool_call_accuracy: {}", accuracy.value);
    println!("tool_call_f1: {}", f1.value);
    println!(
        "agent_goal_accuracy_with_reference: {}",
        goal_with_reference.value
    );
    println!(
        "agent_goal_accuracy_without_reference: {}",
        goal_without_reference.value
    );
    Ok(())
}

fn evaluate_weather() -> Result<()> {
    // Three calls issued, two expected: the UV lookup is an extra.
    let sample = AgentSample::new(weather_trajectory()).with_reference_tool_calls(vec![
        ToolCall::new("weather_check", json!({"location": "New York"})),
        ToolCall::new(
            "temperature_conversion",
            json!({"temperature_fahrenheit": 75}),
        ),
    ]);

    let accuracy = ToolCallAccuracy::new().score(&sample)?;
    let f1 = ToolCallF1::new().score(&sample)?;

    println!("\nWeather assistant metrics:");
    println!("tool_call_accuracy: {}", accuracy.value);
    println!("tool_call_f1: {}", f1.value);
    Ok(())
}

async fn evaluate_topic_adherence(judge: Arc<dyn ChatModel>) -> Result<()> {
    let sample = AgentSample::new(topic_trajectory()).with_reference_topics(vec![
        "Einstein's theory of relativity".to_string(),
        "chocolate cake recipe".to_string(),
    ]);

    let adherence = TopicAdherence::new(judge, TopicAdherenceMode::F1)
        .score(&sample)
        .await?;

    println!("\nTopic adherence (F1): {}", adherence.value);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let judge: Arc<dyn ChatModel> = Arc::new(OpenAiChat::new("gpt-4o-mini"));

    evaluate_weather()?;
    evaluate_booking(judge.clone()).await?;
    evaluate_topic_adherence(judge).await?;

    Ok(())
}
