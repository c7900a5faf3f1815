use nurseflow_bedrock::tokens::{get_pricing, usage_for, TokenCount};

#[test]
fn known_models_are_priced() {
    let sonnet = get_pricing("us.anthropic.claude-sonnet-4-20250514-v1:0").unwrap();
    assert_eq!(sonnet.input_per_million, 3.0);

    let haiku = get_pricing("us.anthropic.claude-haiku-4-5-20251001-v1:0").unwrap();
    assert_eq!(haiku.output_per_million, 5.0);
}

#[test]
fn unknown_models_cost_nothing() {
    let tokens = TokenCount { input: 1_000, output: 200 };
    let usage = usage_for("amazon.nova-lite-v1:0", tokens);
    assert_eq!(usage.cost_usd, 0.0);
    assert_eq!(usage.tokens.total(), 1_200);
}

#[test]
fn cost_scales_per_million() {
    let tokens = TokenCount { input: 1_000_000, output: 100_000 };
    let usage = usage_for("us.anthropic.claude-sonnet-4-20250514-v1:0", tokens);
    assert!((usage.cost_usd - 4.5).abs() < 1e-9);
}
