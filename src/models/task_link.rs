use crate::error::LinkError;

/// 从作业链接中取出作业 hash
///
/// 接受 `https://edu.skysmart.ru/student/<hash>` 形式的链接或直接给出的 hash。
/// 链接中的查询参数、锚点和结尾斜杠会被忽略。
pub fn parse_task_hash(input: &str, link_prefix: &str) -> Result<String, LinkError> {
    let input = input.trim();

    let rest = if let Some(rest) = input.strip_prefix(link_prefix) {
        rest
    } else if input.contains("://") || input.contains('/') {
        return Err(LinkError::WrongPrefix(input.to_string()));
    } else {
        input
    };

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let hash = rest.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

    if hash.is_empty() {
        return Err(LinkError::EmptyHash);
    }
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://edu.skysmart.ru/student/";

    #[test]
    fn parses_student_link() {
        assert_eq!(
            parse_task_hash("https://edu.skysmart.ru/student/kaxedubevo", PREFIX).unwrap(),
            "kaxedubevo"
        );
        assert_eq!(
            parse_task_hash(" https://edu.skysmart.ru/student/kaxedubevo/?utm=1#top ", PREFIX).unwrap(),
            "kaxedubevo"
        );
    }

    #[test]
    fn accepts_bare_hash() {
        assert_eq!(parse_task_hash("kaxedubevo", PREFIX).unwrap(), "kaxedubevo");
    }

    #[test]
    fn rejects_foreign_links_and_empty_hash() {
        assert!(matches!(
            parse_task_hash("https://example.com/student/abc", PREFIX),
            Err(LinkError::WrongPrefix(_))
        ));
        assert_eq!(parse_task_hash(PREFIX, PREFIX), Err(LinkError::EmptyHash));
        assert_eq!(parse_task_hash("   ", PREFIX), Err(LinkError::EmptyHash));
    }
}
