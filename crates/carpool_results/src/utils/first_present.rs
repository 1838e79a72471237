/// Returns the first present value of an ordered list of candidate sources.
pub fn first_present<T>(sources: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    sources.into_iter().flatten().next()
}
