use std::{
    borrow::Cow,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use ahash::AHashMap;
use herald_error::{ErrorExt, HeraldResult, SubscribeError};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::{
    effective_name, Action, PublishOptions, SubscribeOptions, Subscriber, Subscription,
};
use crate::config::PublisherConfig;

type Subscriptions<T> = Vec<Arc<Subscription<T>>>;

/// Снимок счётчиков публикатора.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublisherStats {
    /// Вызовы `publish`.
    pub published: usize,
    /// Вызовы подписчиков.
    pub delivered: usize,
    /// Подписки, удалённые по исчерпанию лимита вызовов.
    pub retired: usize,
    /// Отклонённые вызовы `subscribe`/`unsubscribe`.
    pub rejected: usize,
}

/// Синхронный реестр publish/subscribe.
///
/// Поддерживает:
/// - Подписки по эффективному имени события (событие + необязательный scope)
/// - Лимит вызовов на подписчика с автоматическим удалением
/// - Отменяемые действия
/// - Повторный вход из подписчиков
///
/// Подписчики выполняются в потоке публикации, по порядку регистрации, один
/// за другим. Пока подписчик работает, блокировка реестра не удерживается.
///
/// Каждый `publish` обходит снимок подписок, сделанный в начале вызова.
/// Подписчик, добавленный во время доставки, получит только следующие
/// публикации; подписка, удалённая во время доставки, пропускается, если до
/// неё ещё не дошли.
pub struct Publisher<T> {
    /// Эффективное имя события → подписки в порядке добавления
    registry: Mutex<AHashMap<String, Subscriptions<T>>>,
    /// Разделитель между событием и scope в эффективном имени
    scope_separator: String,
    published: AtomicUsize,
    delivered: AtomicUsize,
    retired: AtomicUsize,
    rejected: AtomicUsize,
}

impl<T> Publisher<T> {
    /// Создаёт публикатор с конфигурацией по умолчанию.
    pub fn new() -> Self {
        Self::with_config(PublisherConfig::default())
    }

    pub fn with_config(config: PublisherConfig) -> Self {
        Self {
            registry: Mutex::new(AHashMap::new()),
            scope_separator: config.scope_separator,
            published: AtomicUsize::new(0),
            delivered: AtomicUsize::new(0),
            retired: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
        }
    }

    /// Ключ реестра для `event` с учётом `scope`.
    pub fn resolve_name<'a>(
        &self,
        event: &'a str,
        scope: Option<&str>,
    ) -> Cow<'a, str> {
        effective_name(event, scope, &self.scope_separator)
    }

    /// Подписывает на событие.
    ///
    /// Возвращает `false` и ничего не регистрирует, если лимит вызовов равен
    /// нулю или подписчик уже зарегистрирован под тем же эффективным именем.
    pub fn subscribe(
        &self,
        event: &str,
        subscriber: &Subscriber<T>,
        options: SubscribeOptions,
    ) -> bool {
        self.try_subscribe(event, subscriber, options).is_ok()
    }

    /// То же, что [`subscribe`](Self::subscribe), но с причиной отказа.
    pub fn try_subscribe(
        &self,
        event: &str,
        subscriber: &Subscriber<T>,
        options: SubscribeOptions,
    ) -> Result<(), SubscribeError> {
        if options.max_call_count == Some(0) {
            return Err(self.reject(SubscribeError::InvalidMaxCallCount));
        }

        let name = self.resolve_name(event, options.scope.as_deref());
        let mut registry = self.registry.lock();
        let subscriptions = registry.entry(name.to_string()).or_default();

        if subscriptions.iter().any(|s| s.subscriber == *subscriber) {
            drop(registry);
            return Err(self.reject(SubscribeError::AlreadySubscribed {
                event: name.into_owned(),
            }));
        }

        subscriptions.push(Arc::new(Subscription::new(
            subscriber.clone(),
            options.max_call_count,
        )));
        debug!(
            event = %name,
            max_call_count = ?options.max_call_count,
            subscribers = subscriptions.len(),
            "subscriber registered"
        );
        Ok(())
    }

    /// Подписка, которая снимается после первой доставки.
    ///
    /// `max_call_count` из `options` игнорируется.
    pub fn once(
        &self,
        event: &str,
        subscriber: &Subscriber<T>,
        options: SubscribeOptions,
    ) -> bool {
        self.subscribe(
            event,
            subscriber,
            SubscribeOptions {
                max_call_count: Some(1),
                ..options
            },
        )
    }

    /// Отписывает от события.
    ///
    /// `scope` должен совпадать с указанным при подписке. `true` только если
    /// подписка действительно удалена.
    pub fn unsubscribe(
        &self,
        event: &str,
        subscriber: &Subscriber<T>,
        scope: Option<&str>,
    ) -> bool {
        self.try_unsubscribe(event, subscriber, scope).is_ok()
    }

    pub fn try_unsubscribe(
        &self,
        event: &str,
        subscriber: &Subscriber<T>,
        scope: Option<&str>,
    ) -> Result<(), SubscribeError> {
        let name = self.resolve_name(event, scope);
        let removed = {
            let mut registry = self.registry.lock();
            registry
                .get_mut(name.as_ref())
                .and_then(|subscriptions| {
                    let index = subscriptions
                        .iter()
                        .position(|s| s.subscriber == *subscriber)?;
                    Some(subscriptions.remove(index))
                })
                .inspect(|subscription| subscription.retire())
        };

        match removed {
            Some(_) => {
                debug!(event = %name, "subscriber removed");
                Ok(())
            }
            None => Err(self.reject(SubscribeError::NotSubscribed {
                event: name.into_owned(),
            })),
        }
    }

    /// Публикует событие и возвращает действие, когда все подписчики
    /// отработали.
    ///
    /// Счётчик вызовов обновляется, а исчерпанная подписка удаляется до
    /// вызова её callback. Первая ошибка подписчика прерывает доставку:
    /// остальные не вызываются, ошибка возвращается с именем события в
    /// контексте. Учёт, сделанный до этого момента, сохраняется.
    ///
    /// Публикация в событие без подписчиков его не регистрирует.
    pub fn publish(
        &self,
        event: &str,
        detail: impl Into<Option<T>>,
        options: PublishOptions,
    ) -> HeraldResult<Action<T>> {
        self.published.fetch_add(1, Ordering::Relaxed);

        let name = self.resolve_name(event, options.scope.as_deref());
        let snapshot: Subscriptions<T> = self
            .registry
            .lock()
            .get(name.as_ref())
            .cloned()
            .unwrap_or_default();
        let action = Action::new(detail, options.cancellable);

        trace!(
            event = %name,
            subscribers = snapshot.len(),
            cancellable = options.cancellable,
            "publishing event"
        );

        for subscription in &snapshot {
            if !self.claim(&name, subscription) {
                continue;
            }
            self.delivered.fetch_add(1, Ordering::Relaxed);

            if let Err(err) = subscription.subscriber.call(&action) {
                let err = err.context(format!("dispatching event '{name}'"));
                warn!(
                    event = %name,
                    code = %err.status_code(),
                    tags = ?err.metrics_tags(),
                    error = %err,
                    "subscriber failed, dispatch interrupted"
                );
                return Err(err);
            }
        }

        Ok(action)
    }

    /// Была ли когда-либо подписка на эффективное имя.
    ///
    /// Остаётся `true` и после ухода последнего подписчика.
    pub fn has_event(
        &self,
        event: &str,
        scope: Option<&str>,
    ) -> bool {
        let name = self.resolve_name(event, scope);
        self.registry.lock().contains_key(name.as_ref())
    }

    pub fn subscriber_count(
        &self,
        event: &str,
        scope: Option<&str>,
    ) -> usize {
        let name = self.resolve_name(event, scope);
        self.registry.lock().get(name.as_ref()).map_or(0, Vec::len)
    }

    pub fn is_subscribed(
        &self,
        event: &str,
        subscriber: &Subscriber<T>,
        scope: Option<&str>,
    ) -> bool {
        let name = self.resolve_name(event, scope);
        self.registry
            .lock()
            .get(name.as_ref())
            .is_some_and(|subscriptions| subscriptions.iter().any(|s| s.subscriber == *subscriber))
    }

    /// Известные эффективные имена, отсортированные.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn stats(&self) -> PublisherStats {
        PublisherStats {
            published: self.published.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            retired: self.retired.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    /// Списывает один вызов из бюджета подписки.
    ///
    /// `false`, если подписка покинула реестр после снятия снимка. Проверка и
    /// инкремент идут под блокировкой реестра, поэтому параллельные и
    /// вложенные публикации не превышают лимит.
    fn claim(
        &self,
        name: &str,
        subscription: &Arc<Subscription<T>>,
    ) -> bool {
        let mut registry = self.registry.lock();
        if !subscription.is_active() {
            return false;
        }

        if subscription.record_call() {
            if let Some(subscriptions) = registry.get_mut(name) {
                subscriptions.retain(|s| !Arc::ptr_eq(s, subscription));
            }
            subscription.retire();
            self.retired.fetch_add(1, Ordering::Relaxed);
            debug!(event = %name, "subscriber reached its call limit and was removed");
        }
        true
    }

    fn reject(
        &self,
        err: SubscribeError,
    ) -> SubscribeError {
        self.rejected.fetch_add(1, Ordering::Relaxed);
        debug!(
            code = %err.status_code(),
            tags = ?err.metrics_tags(),
            error = %err,
            "subscription change rejected"
        );
        err
    }
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("events", &self.registry.lock().len())
            .field("scope_separator", &self.scope_separator)
            .field("stats", &self.stats())
            .finish()
    }
}
