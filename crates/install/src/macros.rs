//! Macros for context builder helpers

/// Generate `with_<field>` setters plus `with_event_sender` for a context
/// struct that carries an `event_sender: Option<EventSender>` field
macro_rules! context_builder {
    ($name:ident { $($field:ident: $ty:ty),* $(,)? }) => {
        paste::paste! {
            impl $name {
                $( #[must_use]
                pub fn [<with_ $field>](mut self, value: $ty) -> Self {
                    self.$field = value;
                    self
                } )*

                /// Set the event sender for progress reporting
                #[must_use]
                pub fn with_event_sender(mut self, sender: ghostup_events::EventSender) -> Self {
                    self.event_sender = Some(sender);
                    self
                }
            }
        }
    };
}
