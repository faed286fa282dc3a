fn main() {
    ns_rpc_lib::run()
}
