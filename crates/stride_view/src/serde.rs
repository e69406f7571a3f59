use serde_core::{Serialize, Serializer};
use stride_dim::Dim;

use crate::{View, ViewMut};

impl<T, E, S> Serialize for View<'_, T, E, S>
where
    T: Serialize,
    E: Dim,
    S: Dim,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<T, E, S> Serialize for ViewMut<'_, T, E, S>
where
    T: Serialize,
    E: Dim,
    S: Dim,
{
    #[inline]
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        self.as_view().serialize(serializer)
    }
}
