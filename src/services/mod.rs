#[cfg(feature = "service-crafting")] pub mod crafting;
#[cfg(feature = "service-loot")]     pub mod loot;
#[cfg(feature = "service-vendor")]   pub mod vendor;
