use hashlab_digest::{HmacKey, Pepper};

pub const PEPPER_VAR: &str = "HASHLAB_PEPPER";

pub const HMAC_KEY_VAR: &str = "HASHLAB_HMAC_KEY";

/// Where commands look up secrets. Looked up once per command and passed
/// into the digest library explicitly.
pub trait SecretSource {
    fn pepper(&self) -> Option<Pepper>;
    fn hmac_key(&self) -> Option<HmacKey>;
}

/// Secrets from process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn pepper(&self) -> Option<Pepper> { std::env::var(PEPPER_VAR).ok().map(Pepper::from) }

    fn hmac_key(&self) -> Option<HmacKey> { std::env::var(HMAC_KEY_VAR).ok().map(HmacKey::from) }
}

#[cfg(test)]
pub(crate) struct FixedSecrets {
    pub pepper: Option<&'static str>,
    pub hmac_key: Option<&'static str>,
}

#[cfg(test)]
impl SecretSource for FixedSecrets {
    fn pepper(&self) -> Option<Pepper> { self.pepper.map(Pepper::from) }

    fn hmac_key(&self) -> Option<HmacKey> { self.hmac_key.map(HmacKey::from) }
}
