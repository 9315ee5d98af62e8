use std::sync::atomic::{AtomicBool, Ordering};

/// Одно опубликованное событие.
///
/// Создаётся [`Publisher::publish`](super::Publisher::publish) на каждый
/// вызов, передаётся по ссылке каждому подписчику и в конце возвращается
/// публикатору. `detail` и `cancelable` задаются при создании; изменяемым
/// остаётся только флаг `default_prevented`, который подписчик может поднять
/// через [`Action::prevent_default`], если действие отменяемое.
#[derive(Debug)]
pub struct Action<T> {
    detail: Option<T>,
    cancelable: bool,
    default_prevented: AtomicBool,
}

impl<T> Action<T> {
    /// Создаёт действие с необязательной полезной нагрузкой.
    ///
    /// `None` и «нет нагрузки» означают одно и то же.
    pub fn new(
        detail: impl Into<Option<T>>,
        cancelable: bool,
    ) -> Self {
        Self {
            detail: detail.into(),
            cancelable,
            default_prevented: AtomicBool::new(false),
        }
    }

    /// Нагрузка, переданная публикатором.
    pub fn detail(&self) -> Option<&T> {
        self.detail.as_ref()
    }

    /// Забирает нагрузку, поглощая действие.
    pub fn into_detail(self) -> Option<T> {
        self.detail
    }

    /// Разрешено ли подписчикам отменять действие.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Попросил ли какой-то подписчик не продолжать.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Relaxed)
    }

    /// Сообщает публикатору, что задуманное действие выполнять не нужно.
    ///
    /// Ничего не делает, если действие не отменяемое. Повторный вызов
    /// равносилен одному.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.store(true, Ordering::Relaxed);
        }
    }
}

impl<T> Default for Action<T> {
    fn default() -> Self {
        Self::new(None, false)
    }
}

impl<T: Clone> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            detail: self.detail.clone(),
            cancelable: self.cancelable,
            default_prevented: AtomicBool::new(self.default_prevented()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Действие без нагрузки не имеет `detail`.
    #[test]
    fn test_detail_absent_when_not_set() {
        let a: Action<String> = Action::default();
        let b: Action<String> = Action::new(None, false);
        assert!(a.detail().is_none());
        assert!(b.detail().is_none());
    }

    #[test]
    fn test_detail_is_kept() {
        let action = Action::new("payload".to_string(), false);
        assert_eq!(action.detail().map(String::as_str), Some("payload"));
        assert_eq!(action.into_detail().as_deref(), Some("payload"));
    }

    #[test]
    fn test_not_cancelable_by_default() {
        let action: Action<()> = Action::default();
        assert!(!action.cancelable());
        assert!(!action.default_prevented());
    }

    /// `prevent_default` на неотменяемом действии игнорируется.
    #[test]
    fn test_prevent_default_ignored_when_not_cancelable() {
        let action: Action<u8> = Action::new(1, false);
        action.prevent_default();
        assert!(!action.default_prevented());
    }

    #[test]
    fn test_prevent_default_when_cancelable() {
        let action: Action<u8> = Action::new(None, true);
        action.prevent_default();
        assert!(action.cancelable());
        assert!(action.default_prevented());

        // повторный вызов ничего не меняет
        action.prevent_default();
        assert!(action.default_prevented());
    }

    #[test]
    fn test_clone_keeps_prevented_flag() {
        let action = Action::new(vec![1, 2], true);
        action.prevent_default();
        let copy = action.clone();
        assert!(copy.default_prevented());
        assert_eq!(copy.detail(), Some(&vec![1, 2]));
    }
}
