//! Serialization and deserialization implementations using `serde` for
//! [`DomainMap`] and [`Domain`]

#[cfg(not(feature = "std"))]
use alloc::format;
use core::{
	any,
	fmt::{Formatter, Result as FmtResult},
	marker::PhantomData,
};

use serde::{
	de::{Error as SerdeError, MapAccess, Unexpected, Visitor},
	ser::SerializeMap,
	Deserialize, Deserializer, Serialize,
};

use crate::{Domain, DomainMap};

struct DomainMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for DomainMapVisitor<T> {
	type Value = DomainMap<T>;

	fn expecting(&self, f: &mut Formatter) -> FmtResult {
		f.write_fmt(format_args!(
			"a map with domain name keys and {} values",
			any::type_name::<T>()
		))
	}

	fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut domainmap = map
			.size_hint()
			.map_or_else(DomainMap::default, |cap| DomainMap::with_capacity(cap));

		while let Some((k, v)) = map.next_entry()? {
			domainmap.set(k, v);
		}

		Ok(domainmap)
	}
}

struct DomainVisitor;

impl<'de> Visitor<'de> for DomainVisitor {
	type Value = Domain;

	fn expecting(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("a valid domain name")
	}

	fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
	where
		E: SerdeError,
	{
		Domain::presented(v)
			.or_else(|_| Domain::reference(v))
			.map_err(|_| SerdeError::invalid_value(Unexpected::Str(v), &self))
	}
}

impl<T: Serialize> Serialize for DomainMap<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.len()))?;

		for (k, v) in self {
			map.serialize_entry(k, v)?;
		}

		map.end()
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DomainMap<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(DomainMapVisitor::<T>(PhantomData))
	}
}

impl Serialize for Domain {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&format!("{self:#}"))
	}
}

impl<'de> Deserialize<'de> for Domain {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(DomainVisitor)
	}
}
