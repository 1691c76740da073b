#[cfg(feature = "openai")]
#[test]
fn openai_chat_client_compiles() {
    use evalchain_llm::OpenAiChat;

    let _ = OpenAiChat::new("gpt-4o-mini");
    let _ = OpenAiChat::with_api_key("sk-test", "gpt-4o");
}
