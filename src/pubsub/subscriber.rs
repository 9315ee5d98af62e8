use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use herald_error::HeraldResult;

use super::Action;

type Callback<T> = dyn Fn(&Action<T>) -> HeraldResult<()> + Send + Sync;

/// Callback, зарегистрированный в [`Publisher`](super::Publisher).
///
/// Клонируется дёшево, и клоны считаются одним подписчиком: равенство и хеш
/// берутся по адресу общего callback, а не по поведению. Два дескриптора из
/// одинаковых замыканий считаются разными подписчиками.
pub struct Subscriber<T> {
    callback: Arc<Callback<T>>,
}

impl<T> Subscriber<T> {
    /// Оборачивает callback, который не может завершиться ошибкой.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Action<T>) + Send + Sync + 'static,
    {
        Self::try_new(move |action| {
            f(action);
            Ok(())
        })
    }

    /// Оборачивает callback, который может вернуть ошибку.
    ///
    /// Ошибка прерывает вызвавший его `publish` и возвращается публикатору.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&Action<T>) -> HeraldResult<()> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(f),
        }
    }

    pub(crate) fn call(
        &self,
        action: &Action<T>,
    ) -> HeraldResult<()> {
        (self.callback)(action)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.callback).cast::<()>()
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> PartialEq for Subscriber<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.addr() == other.addr()
    }
}

impl<T> Eq for Subscriber<T> {}

impl<T> Hash for Subscriber<T> {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.addr().hash(state);
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_tuple("Subscriber").field(&self.addr()).finish()
    }
}

/// Options accepted by `subscribe` and `once`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Число доставок, после которого подписчик снимается. `None` значит без
    /// ограничения; `Some(0)` отклоняется.
    pub max_call_count: Option<usize>,
    /// Уточнение, добавляемое к имени события.
    pub scope: Option<String>,
}

impl SubscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_call_count(
        mut self,
        max_call_count: usize,
    ) -> Self {
        self.max_call_count = Some(max_call_count);
        self
    }

    pub fn with_scope(
        mut self,
        scope: impl Into<String>,
    ) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Options accepted by `publish`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Lets subscribers call [`Action::prevent_default`].
    pub cancellable: bool,
    /// Должен совпадать со scope подписки.
    pub scope: Option<String>,
}

impl PublishOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancellable(mut self) -> Self {
        self.cancellable = true;
        self
    }

    pub fn with_scope(
        mut self,
        scope: impl Into<String>,
    ) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Запись реестра: один подписчик под одним эффективным именем.
///
/// Счётчики меняются только под блокировкой реестра; атомики позволяют
/// делить запись со снимками текущих доставок.
pub(crate) struct Subscription<T> {
    pub(crate) subscriber: Subscriber<T>,
    max_call_count: Option<usize>,
    call_count: AtomicUsize,
    active: AtomicBool,
}

impl<T> Subscription<T> {
    pub(crate) fn new(
        subscriber: Subscriber<T>,
        max_call_count: Option<usize>,
    ) -> Self {
        Self {
            subscriber,
            max_call_count,
            call_count: AtomicUsize::new(0),
            active: AtomicBool::new(true),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Помечает запись как удалённую из реестра.
    pub(crate) fn retire(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Учитывает доставку и сообщает, исчерпан ли бюджет.
    pub(crate) fn record_call(&self) -> bool {
        let calls = self.call_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.max_call_count.is_some_and(|max| calls >= max)
    }

    #[cfg(test)]
    pub(crate) fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}
