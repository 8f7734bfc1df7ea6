//! Algorithm definitions

/// Supported hash and signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    // === Hash functions ===
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,

    // === Signature schemes ===
    /// ECDSA over P-256 with SHA-256
    Ecdsa,
    Ed25519,
}

impl Algorithm {
    /// Every supported algorithm, in display order
    pub const ALL: [Algorithm; 10] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
        Self::Ecdsa,
        Self::Ed25519,
    ];

    /// Parse algorithm from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Some(Self::Md5),
            "sha1" | "sha-1" => Some(Self::Sha1),
            "sha224" | "sha-224" => Some(Self::Sha224),
            "sha256" | "sha-256" => Some(Self::Sha256),
            "sha384" | "sha-384" => Some(Self::Sha384),
            "sha512" | "sha-512" => Some(Self::Sha512),
            "sha512/224" | "sha-512/224" => Some(Self::Sha512_224),
            "sha512/256" | "sha-512/256" => Some(Self::Sha512_256),
            "ecdsa" => Some(Self::Ecdsa),
            "ed25519" => Some(Self::Ed25519),
            _ => None,
        }
    }

    /// Get canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512/224",
            Self::Sha512_256 => "sha512/256",
            Self::Ecdsa => "ecdsa",
            Self::Ed25519 => "ed25519",
        }
    }

    /// Human-readable description, logged at startup
    pub fn description(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5 hash algorithm",
            Self::Sha1 => "SHA-1 hash algorithm",
            Self::Sha224 => "SHA-224 hash algorithm",
            Self::Sha256 => "SHA-256 hash algorithm",
            Self::Sha384 => "SHA-384 hash algorithm",
            Self::Sha512 => "SHA-512 hash algorithm",
            Self::Sha512_224 => "SHA-512/224 hash algorithm",
            Self::Sha512_256 => "SHA-512/256 hash algorithm",
            Self::Ecdsa => {
                "ECDSA as defined in FIPS 186-3 on curve P-256, message hashed by SHA-256"
            }
            Self::Ed25519 => "Ed25519 signature algorithm",
        }
    }

    /// Check if the algorithm needs a keypair
    pub fn is_signature(&self) -> bool {
        matches!(self, Self::Ecdsa | Self::Ed25519)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
