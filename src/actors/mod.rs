mod errors;
mod partition_actor;

pub use errors::ActorError;
pub use partition_actor::PartitionActor;
