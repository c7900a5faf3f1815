//! Vital-sign extraction via the Bedrock Converse API.
//!
//! The model is asked for a flat JSON object keyed by `sbp`, `hr`, `rr`,
//! `spo2` and `temp`. Its reply is untrusted: parsing is fail-soft and a
//! malformed reply becomes an empty mapping, which scores as "no data".

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ImageBlock, ImageFormat, ImageSource, InferenceConfiguration,
    Message, SystemContentBlock,
};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use nurseflow_core::RawVitals;

use crate::error::BedrockError;
use crate::tokens::{self, TokenUsage};

const VITALS_SYSTEM_PROMPT: &str = "\
Act as a medical data parser. Extract vital signs from the observation into a JSON object. \
Keys required: 'sbp' (systolic blood pressure), 'hr' (heart rate), 'rr' (respiration rate), \
'spo2' (oxygen saturation), 'temp' (temperature in degrees Celsius). \
Use null for any vital sign that is not present. \
Return ONLY valid JSON. Do not write markdown blocks.";

const IMAGE_INSTRUCTION: &str = "\
This is a photograph of a patient monitor. Read the displayed vital signs \
and return them as the JSON object described.";

const MAX_OUTPUT_TOKENS: i32 = 512;

/// Vitals extracted by one model call.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub id: Uuid,
    pub model_id: String,
    pub vitals: RawVitals,
    pub usage: TokenUsage,
}

/// Extract vitals from a free-text clinical note.
pub async fn extract_vitals_from_text(
    client: &Client,
    model_id: &str,
    note: &str,
) -> Result<Extraction, BedrockError> {
    let content = vec![ContentBlock::Text(observation_block(note))];
    extract_vitals(client, model_id, content).await
}

/// Extract vitals from a photograph of a monitor display.
pub async fn extract_vitals_from_image(
    client: &Client,
    model_id: &str,
    bytes: &[u8],
    format: ImageFormat,
) -> Result<Extraction, BedrockError> {
    let image = ImageBlock::builder()
        .format(format)
        .source(ImageSource::Bytes(aws_smithy_types::Blob::new(bytes)))
        .build()
        .map_err(|e| BedrockError::Invocation(e.to_string()))?;

    let content = vec![
        ContentBlock::Image(image),
        ContentBlock::Text(IMAGE_INSTRUCTION.to_string()),
    ];
    extract_vitals(client, model_id, content).await
}

/// Wrap a note in the tag block the extraction prompt refers to.
pub fn observation_block(note: &str) -> String {
    let mut block = String::from("<observation>\n");
    block.push_str(note.trim());
    block.push_str("\n</observation>");
    block
}

/// Parse the model's reply into a raw vitals mapping. Never fails.
///
/// Markdown code fences are stripped, a JSON array yields its first
/// element, and anything undecodable yields an empty mapping.
pub fn parse_vitals_response(text: &str) -> RawVitals {
    let body = strip_code_fence(text.trim());

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .next()
            .map(RawVitals::from)
            .unwrap_or_default(),
        Ok(value) => RawVitals::from(value),
        Err(e) => {
            warn!(error = %e, response_len = text.len(), "model returned malformed vitals JSON");
            RawVitals::default()
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Map a file extension to a Bedrock `ImageFormat`.
///
/// Returns `None` for extensions the Converse API can't read as images.
pub fn image_format_for_extension(ext: &str) -> Option<ImageFormat> {
    match ext.to_lowercase().as_str() {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "gif" => Some(ImageFormat::Gif),
        "webp" => Some(ImageFormat::Webp),
        _ => None,
    }
}

async fn extract_vitals(
    client: &Client,
    model_id: &str,
    content: Vec<ContentBlock>,
) -> Result<Extraction, BedrockError> {
    let id = Uuid::new_v4();
    info!(transaction_id = %id, model = model_id, "starting vitals extraction");

    let message = Message::builder()
        .role(ConversationRole::User)
        .set_content(Some(content))
        .build()
        .map_err(|e| BedrockError::Invocation(e.to_string()))?;

    let (response_text, usage) = invoke_converse(client, model_id, message).await?;
    let vitals = parse_vitals_response(&response_text);

    info!(
        transaction_id = %id,
        fields = vitals.len(),
        input_tokens = usage.tokens.input,
        output_tokens = usage.tokens.output,
        "vitals extraction complete"
    );

    Ok(Extraction {
        id,
        model_id: model_id.to_string(),
        vitals,
        usage,
    })
}

/// Core invocation using the Bedrock Converse API.
/// Returns the response text and token usage.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    message: Message,
) -> Result<(String, TokenUsage), BedrockError> {
    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(VITALS_SYSTEM_PROMPT.to_string()))
        .messages(message)
        .inference_config(
            InferenceConfiguration::builder()
                .temperature(0.0)
                .max_tokens(MAX_OUTPUT_TOKENS)
                .build(),
        )
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    let tokens = response
        .usage()
        .map(tokens::extract_token_usage)
        .unwrap_or_default();

    Ok((response_text, tokens::usage_for(model_id, tokens)))
}
