pub mod broker;
pub mod channel;
pub mod events;

pub use broker::{Broker, ChannelEvent};
pub use channel::{authorize_channel, ChannelAccess, ChannelName};
pub use events::TaskCreatedEvent;
