// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================
// Los clones comparten valor y subscribers (observer sobre Rc<RefCell>)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Identificador de una suscripción (para `unsubscribe`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Subscribers<T> {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
}

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<Subscribers<T>>,
}

impl<T: Clone> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(Subscribers {
                next_id: Cell::new(0),
                callbacks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Copia del valor actual
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.subscribers.next_id.get());
        self.subscribers.next_id.set(id.0 + 1);
        self.subscribers
            .callbacks
            .borrow_mut()
            .push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .callbacks
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Notificar a todos los subscribers
    ///
    /// Se notifica sobre una copia: un subscriber puede volver a escribir el estado
    fn notify(&self) {
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        if callbacks.is_empty() {
            return;
        }
        let current = self.snapshot();
        for callback in callbacks {
            callback(&current);
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(0u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.subscribe(move |v| sink.borrow_mut().push(*v));

        let other = state.clone();
        other.set(3);
        other.update(|v| *v += 1);

        assert_eq!(state.snapshot(), 4);
        assert_eq!(*seen.borrow(), vec![3, 4]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let state = ReactiveState::new(String::new());
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let id = state.subscribe(move |_| counter.set(counter.get() + 1));

        state.set("a".into());
        state.unsubscribe(id);
        state.set("b".into());

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn subscriber_may_write_back_without_panicking() {
        let state = ReactiveState::new(0i32);
        let writer = state.clone();
        state.subscribe(move |v| {
            if *v < 0 {
                writer.set(0);
            }
        });

        state.set(-5);
        assert_eq!(state.snapshot(), 0);
    }
}
