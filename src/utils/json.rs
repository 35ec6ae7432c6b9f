//! 模型响应中的JSON提取

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 取出Markdown代码块中的内容，代码块可以出现在响应的任意位置
///
/// 没有代码块时返回`None`；缺少结束标记时取到响应末尾
pub fn extract_code_block(response: &str) -> Option<&str> {
    let start = response.find("```")?;
    let rest = &response[start + 3..];

    // 跳过语言标记所在的第一行
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    match body.find("```") {
        Some(end) => Some(body[..end].trim()),
        None => Some(body.trim()),
    }
}

/// 取出响应中最外层的JSON对象或数组，即第一个`{`/`[`到与之对应的最后一个`}`/`]`
pub fn extract_outermost_json(response: &str) -> Option<&str> {
    let start = response.find(['{', '['])?;
    let close = if response[start..].starts_with('{') { '}' } else { ']' };
    let end = response.rfind(close)?;
    (end > start).then(|| &response[start..=end])
}

/// 解析模型响应为JSON值
///
/// 依次尝试：整个响应、代码块内容、最外层的JSON片段
pub fn parse_value(response: &str) -> Result<Value, serde_json::Error> {
    let trimmed = response.trim();
    let direct = serde_json::from_str::<Value>(trimmed);
    if direct.is_ok() {
        return direct;
    }

    let candidates = [
        extract_code_block(trimmed),
        extract_code_block(trimmed).and_then(extract_outermost_json),
        extract_outermost_json(trimmed),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .map_or(direct, Ok)
}

/// 从响应中取出列表
///
/// 接受顶层数组；对象时优先取`key`字段，否则取唯一的数组字段
pub fn parse_list<T: DeserializeOwned>(response: &str, key: &str) -> Result<Vec<T>, serde_json::Error> {
    let value = match parse_value(response)? {
        Value::Object(mut map) => match map.remove(key) {
            Some(list) => list,
            None => {
                let mut arrays = map.into_iter().filter(|(_, v)| v.is_array());
                match (arrays.next(), arrays.next()) {
                    (Some((_, list)), None) => list,
                    _ => Value::Object(Default::default()),
                }
            }
        },
        other => other,
    };
    serde_json::from_value(value)
}

/// 从响应中取出对象，兼容被包裹在`key`字段下的情况
///
/// 外层对象本身能解析时直接使用，否则退回到`key`字段下的对象，其余同级字段忽略
pub fn parse_object<T: DeserializeOwned>(response: &str, key: &str) -> Result<T, serde_json::Error> {
    let value = parse_value(response)?;
    match T::deserialize(&value) {
        Ok(output) => Ok(output),
        Err(err) => match value.get(key) {
            Some(inner) if inner.is_object() => T::deserialize(inner),
            _ => Err(err),
        },
    }
}
