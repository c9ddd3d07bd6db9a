/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
pub const OPENAI_API_URL: &str = "https://api.openai.com";
pub const GOOGLE_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const GROQ_API_URL: &str = "https://api.groq.com";
pub const DEFAULT_OLLAMA_HOST: &str = "localhost";
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 120;

// Generation Limits
pub const ENHANCE_MAX_TOKENS: u32 = 1024; // Uniform output cap for every enhancement
pub const VALIDATION_MAX_TOKENS: u32 = 10;
pub const VALIDATION_PROBE_PROMPT: &str = "Hi";

// Cheap, fast models used for API key validation probes. None of the hosted
// providers expose a dedicated key-check endpoint, so validation issues a
// minimal real completion against these.
pub const ANTHROPIC_VALIDATION_MODEL: &str = "claude-3-5-haiku-20241022";
pub const OPENAI_VALIDATION_MODEL: &str = "gpt-3.5-turbo";
pub const GOOGLE_VALIDATION_MODEL: &str = "gemini-1.5-flash";
pub const GROQ_VALIDATION_MODEL: &str = "gemma2-9b-it";

// System Prompts
/// The default system prompt for enhancing prompts
pub const ENHANCEMENT_SYSTEM_PROMPT: &str = r#"You are a prompt enhancement assistant. Transform rough prompts into clear, effective prompts that get better AI results.

Rules:
1. Preserve the original intent exactly
2. Add context and specificity where missing
3. Structure clearly: context → task → format (if needed)
4. Remove ambiguity
5. Stay concise - don't over-elaborate
6. Output ONLY the enhanced prompt, nothing else

Example:
User: "help me write an email to my boss about being late"
Enhanced: "Write a professional, apologetic email to my manager explaining I'll be 15-30 minutes late today. Keep it respectful and brief. Offer to make up the time or handle urgent matters remotely.""#;

pub const FORMAL_SYSTEM_PROMPT: &str = r#"You are a professional prompt enhancement assistant. Transform prompts into formal, business-appropriate language.

Rules:
1. Use professional, polished language
2. Maintain formal tone throughout
3. Clarify objectives without inventing new requirements
4. Remove casual expressions
5. Output ONLY the enhanced prompt, nothing else"#;

pub const CREATIVE_SYSTEM_PROMPT: &str = r#"You are a creative prompt enhancement assistant. Transform prompts to encourage imaginative, unique responses.

Rules:
1. Add creative flair while preserving intent
2. Encourage exploration without adding specific constraints
3. Maintain the core request while opening possibilities
4. Don't prescribe exact details unless the user did
5. Output ONLY the enhanced prompt, nothing else"#;

pub const TECHNICAL_SYSTEM_PROMPT: &str = r#"You are a technical prompt enhancement assistant. Transform prompts for precise, technical responses.

Rules:
1. Use precise technical terminology
2. Clarify technical requirements mentioned, don't invent new ones
3. Structure for clear technical communication
4. Only add specifics (formats, constraints) if the user implied them
5. Output ONLY the enhanced prompt, nothing else"#;
