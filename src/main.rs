fn main() -> anyhow::Result<()> {
    food_orders_lib::run()
}
