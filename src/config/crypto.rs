//! # 凭证加密模块
//!
//! 处理存储凭证（上游 API Key）的加密和解密。
//! 密文格式：`base64(nonce(12) || auth_tag(16) || ciphertext)`，
//! 加密密钥在进程内从共享密钥经 SHA-256 一次性派生。

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose};
use sha2::{Digest, Sha256};

use crate::error::{ProxyError, Result};

/// 共享密钥环境变量名
pub const SECRET_ENV: &str = "AI_ROUTER_SECRET";

/// 随机数长度（字节）
const NONCE_LEN: usize = 12;
/// 认证标签长度（字节）
const TAG_LEN: usize = 16;

/// 凭证加密器
///
/// 构造永不失败：共享密钥缺失时延迟到加解密调用处
/// 以 `Decryption` 错误报告，调用方据此回退而非崩溃。
pub struct SecretCipher {
    cipher: Option<Aes256Gcm>,
}

impl SecretCipher {
    /// 从环境变量读取共享密钥创建加密器
    #[must_use]
    pub fn from_env() -> Self {
        let secret = std::env::var(SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty());
        match secret {
            Some(secret) => Self::from_secret(&secret),
            None => Self { cipher: None },
        }
    }

    /// 从给定共享密钥创建加密器
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        let key: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        Self {
            cipher: Some(Aes256Gcm::new(&key.into())),
        }
    }

    fn cipher(&self) -> Result<&Aes256Gcm> {
        self.cipher
            .as_ref()
            .ok_or_else(|| crate::decryption_error!("共享密钥未配置（{} 环境变量为空）", SECRET_ENV))
    }

    /// 加密明文，返回 base64 编码的密文块
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = self.cipher()?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        // AES-GCM 输出为 ciphertext || tag，存储格式要求 nonce || tag || ciphertext
        let sealed = cipher.encrypt(&nonce, plaintext.as_bytes()).map_err(|e| {
            ProxyError::decryption_with_source(
                "凭证加密失败",
                anyhow::anyhow!("AES-GCM encryption failed: {e}"),
            )
        })?;
        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        let mut combined = Vec::with_capacity(NONCE_LEN + TAG_LEN + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(tag);
        combined.extend_from_slice(ciphertext);
        Ok(general_purpose::STANDARD.encode(&combined))
    }

    /// 解密 base64 编码的密文块
    pub fn decrypt(&self, blob: &str) -> Result<String> {
        let cipher = self.cipher()?;

        let combined = general_purpose::STANDARD
            .decode(blob)
            .map_err(|e| ProxyError::decryption_with_source("密文不是有效的 base64", e))?;

        if combined.len() < NONCE_LEN + TAG_LEN {
            return Err(crate::decryption_error!(
                "密文长度不足: {} 字节",
                combined.len()
            ));
        }

        let nonce = Nonce::from_slice(&combined[..NONCE_LEN]);
        let tag = &combined[NONCE_LEN..NONCE_LEN + TAG_LEN];
        let ciphertext = &combined[NONCE_LEN + TAG_LEN..];

        let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
        sealed.extend_from_slice(ciphertext);
        sealed.extend_from_slice(tag);

        let plaintext = cipher.decrypt(nonce, sealed.as_ref()).map_err(|e| {
            ProxyError::decryption_with_source(
                "凭证解密失败",
                anyhow::anyhow!("AES-GCM decryption failed: {e}"),
            )
        })?;

        String::from_utf8(plaintext)
            .map_err(|e| ProxyError::decryption_with_source("解密后的数据不是有效的UTF-8字符串", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> SecretCipher {
        SecretCipher::from_secret("test_shared_secret_for_unit_tests")
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let cipher = test_cipher();

        let plaintext = "sk-sensitive_api_key_12345";
        let blob = cipher.encrypt(plaintext).unwrap();
        let decrypted = cipher.decrypt(&blob).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_nonce_randomized_per_encryption() {
        let cipher = test_cipher();

        let a = cipher.encrypt("same input").unwrap();
        let b = cipher.encrypt("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tampered_tag_fails() {
        let cipher = test_cipher();

        let blob = cipher.encrypt("payload").unwrap();
        let mut raw = general_purpose::STANDARD.decode(&blob).unwrap();
        // 翻转认证标签中的一位
        raw[NONCE_LEN] ^= 0x01;
        let tampered = general_purpose::STANDARD.encode(&raw);

        let err = cipher.decrypt(&tampered).unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_malformed_blob_fails() {
        let cipher = test_cipher();

        assert!(cipher.decrypt("not-base64!!!").unwrap_err().is_decryption());
        // 合法 base64 但长度不足
        let short = general_purpose::STANDARD.encode([0u8; 8]);
        assert!(cipher.decrypt(&short).unwrap_err().is_decryption());
    }

    #[test]
    fn test_missing_secret_reports_decryption_error() {
        let cipher = SecretCipher { cipher: None };

        assert!(cipher.encrypt("x").unwrap_err().is_decryption());
        assert!(cipher.decrypt("x").unwrap_err().is_decryption());
    }

    #[test]
    fn test_wrong_secret_fails_auth() {
        let blob = test_cipher().encrypt("payload").unwrap();
        let other = SecretCipher::from_secret("a_different_secret");

        assert!(other.decrypt(&blob).unwrap_err().is_decryption());
    }
}
