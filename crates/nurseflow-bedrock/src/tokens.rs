use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

impl TokenCount {
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub tokens: TokenCount,
    pub cost_usd: f64,
}

/// Pricing per million tokens for a Bedrock model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn estimate_cost(&self, tokens: TokenCount) -> f64 {
        let input_cost = (tokens.input as f64 / 1_000_000.0) * self.input_per_million;
        let output_cost = (tokens.output as f64 / 1_000_000.0) * self.output_per_million;
        input_cost + output_cost
    }
}

/// Extract token counts from a Bedrock Converse response.
pub fn extract_token_usage(usage: &aws_sdk_bedrockruntime::types::TokenUsage) -> TokenCount {
    TokenCount {
        input: usage.input_tokens.max(0) as u64,
        output: usage.output_tokens.max(0) as u64,
    }
}

/// Price a token count; unknown models cost nothing.
pub fn usage_for(model_id: &str, tokens: TokenCount) -> TokenUsage {
    TokenUsage {
        tokens,
        cost_usd: get_pricing(model_id).map_or(0.0, |p| p.estimate_cost(tokens)),
    }
}

/// Known model pricing (per million tokens).
/// These are approximate and should be updated as pricing changes.
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    match model_id {
        id if id.contains("claude-opus-4") => Some(ModelPricing {
            input_per_million: 15.0,
            output_per_million: 75.0,
        }),
        id if id.contains("claude-sonnet-4") => Some(ModelPricing {
            input_per_million: 3.0,
            output_per_million: 15.0,
        }),
        id if id.contains("claude-haiku-4-5") => Some(ModelPricing {
            input_per_million: 1.0,
            output_per_million: 5.0,
        }),
        id if id.contains("claude-haiku") => Some(ModelPricing {
            input_per_million: 0.80,
            output_per_million: 4.0,
        }),
        _ => None,
    }
}
