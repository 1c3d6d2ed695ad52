pub struct CheckArgs {
    pub dry_run: bool,
}
