use once_cell::sync::Lazy;

/// SMS/verification-code language. Matched case-insensitively, so the
/// entries are stored lowercase.
static SMS_KEYWORDS: &[&str] = &[
    "短信验证码",
    "验证码",
    "sms",
    "verification code",
    "mobile verification",
    "手机验证",
    "发送验证码",
    "send code",
    "获取验证码",
];

/// Signals of a phone-number input on the page.
static PHONE_PATTERNS: &[&str] = &[
    "type=\"tel\"",
    "phone",
    "mobile",
    "tel",
    "手机",
    "电话",
];

static DEFAULT_POLICY: Lazy<SignalPolicy> = Lazy::new(|| SignalPolicy {
    sms_keywords: SMS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
    phone_patterns: PHONE_PATTERNS.iter().map(|s| s.to_string()).collect(),
});

/// The keyword and pattern sets behind the classifier. Both condition
/// classes are required for a match; substituting sets keeps the
/// conjunctive shape.
#[derive(Debug, Clone)]
pub struct SignalPolicy {
    pub sms_keywords: Vec<String>,
    pub phone_patterns: Vec<String>,
}

impl Default for SignalPolicy {
    fn default() -> Self {
        DEFAULT_POLICY.clone()
    }
}

/// Pure content predicate: true only when the page shows both
/// verification-code language and a phone-input signal. Either alone is not
/// sufficient — generic "phone" or "code" mentions don't match.
#[derive(Debug, Clone)]
pub struct Classifier {
    policy: SignalPolicy,
}

impl Classifier {
    pub fn new(policy: SignalPolicy) -> Self {
        // Matching is case-insensitive; normalize the needles once.
        let policy = SignalPolicy {
            sms_keywords: policy.sms_keywords.iter().map(|s| s.to_lowercase()).collect(),
            phone_patterns: policy.phone_patterns.iter().map(|s| s.to_lowercase()).collect(),
        };
        Self { policy }
    }

    pub fn is_match(&self, content: &str) -> bool {
        let content = content.to_lowercase();
        let has_keyword = self
            .policy
            .sms_keywords
            .iter()
            .any(|k| content.contains(k.as_str()));
        let has_phone = self
            .policy
            .phone_patterns
            .iter()
            .any(|p| content.contains(p.as_str()));
        has_keyword && has_phone
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(SignalPolicy::default())
    }
}
