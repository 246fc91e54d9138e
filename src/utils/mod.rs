use rand::{Rng, RngCore};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// 매치 RNG 에서 v4 형식의 uuid 를 뽑습니다.
/// 같은 시드라면 같은 순서로 같은 uuid 가 나옵니다.
pub fn uuid_from_rng<R: RngCore>(rng: &mut R) -> Uuid {
    let mut bytes: [u8; 16] = rng.gen();

    // RFC4122 variant, v4 version 비트
    bytes[6] = (bytes[6] & 0x0F) | 0x40;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    Uuid::from_bytes(bytes)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// "CR" 과 ["CR", "VSPO!"] 를 모두 받습니다.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(tag)) => vec![tag],
        Some(OneOrMany::Many(tags)) => tags,
        None => vec![],
    })
}

/// "red" -> "Red"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
