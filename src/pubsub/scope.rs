use std::borrow::Cow;

/// `true`, если значения нет или оно состоит только из пробельных символов.
#[inline]
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Вычисляет ключ реестра для события и необязательного scope.
///
/// Пустой scope оставляет имя события как есть. Иначе результат равен
/// `event + separator + scope`. С пустым разделителем по умолчанию это
/// простая конкатенация, поэтому `("ab", "c")` и `("a", "bc")` дают один ключ.
pub fn effective_name<'a>(
    event: &'a str,
    scope: Option<&str>,
    separator: &str,
) -> Cow<'a, str> {
    match scope {
        Some(scope) if !is_blank(Some(scope)) => {
            let mut name = String::with_capacity(event.len() + separator.len() + scope.len());
            name.push_str(event);
            name.push_str(separator);
            name.push_str(scope);
            Cow::Owned(name)
        }
        _ => Cow::Borrowed(event),
    }
}
