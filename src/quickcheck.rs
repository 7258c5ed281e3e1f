use compare::Compare;
use quickcheck::{Arbitrary, Gen};

use crate::Map;

impl<K, V, C> Arbitrary for Map<K, V, C>
where
    K: Arbitrary,
    V: Arbitrary,
    C: Clone + Compare<K> + Default + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        Vec::<(K, V)>::arbitrary(g).into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<(K, V)> = self.clone().into_iter().collect();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}
