//! 密码哈希 (argon2id, PHC 字符串)

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// 生成密码哈希
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// 校验密码
///
/// 密码不匹配返回 `Ok(false)`；哈希格式损坏返回 `Err`
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// 不存在账号时比对用的哈希，参数与真实账号相同
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// 对不存在的账号做一次同等代价的校验
///
/// 让未知邮箱和密码错误的登录耗时一致。结果恒为 `false`。
pub fn verify_dummy(password: &str) -> bool {
    let hash = DUMMY_HASH.get_or_init(|| hash_password("no-such-account").ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash).unwrap());
        assert!(!verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("staff123").unwrap();
        let b = hash_password("staff123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dummy_verify_never_matches() {
        assert!(!verify_dummy("no-such-account"));
        assert!(!verify_dummy("admin123"));
        assert!(DUMMY_HASH.get().unwrap().as_deref().unwrap().starts_with("$argon2"));
    }

    #[test]
    fn test_malformed_hash() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }
}
