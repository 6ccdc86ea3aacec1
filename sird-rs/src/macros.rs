/// Implements one accessor per compartment that extracts the corresponding
/// series through a `series(Compartment)` method.
macro_rules! series_accessors {
    () => {
        series_accessors!(
            susceptible => S,
            infectious => I,
            recovered => R,
            dead => D,
        );
    };
    ($($name:ident => $comp:ident),+ $(,)?) => {
        paste! {
            $(
                #[doc = "Return the `" $name "` series, one value per day."]
                pub fn [<$name _series>](&self) -> Vec<Real> {
                    self.series(Compartment::$comp)
                }
            )+
        }
    };
}
