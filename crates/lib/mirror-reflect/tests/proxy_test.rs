use mirror_reflect::{
    runtime::{Proxy, ProxyHandler},
    inherits, reflect, ArgList, MemberDescriptor, Receiver, Reflect, ReflectError,
};

pub struct Account {
    owner: String,
    balance: i64,
}

impl Account {
    fn deposit(&mut self, amount: i64) -> i64 {
        self.balance += amount;
        self.balance
    }

    fn get_balance(&self) -> i64 {
        self.balance
    }
}

/// An account which reports its balance with the interest due.
pub struct Savings {
    account: Account,
    interest: i64,
}

impl Savings {
    fn get_balance(&self) -> i64 {
        self.account.balance + self.interest
    }
}

inherits!(Savings => account: Account);

reflect! {
    type(Account),
    field(owner),
    field(balance, readonly),
    func(fn deposit(&mut self, amount: i64) -> i64),
    func(fn get_balance(&self) -> i64, property()),

    type(Savings, bases<Account>),
    field(interest),
    func(fn get_balance(&self) -> i64, property()),
}

/// Records every access without touching an account.
#[derive(Default)]
struct Recorder {
    calls: Vec<(&'static str, usize)>,
}

impl ProxyHandler for Recorder {
    type Target = Account;
    type Output = usize;

    fn invoke_impl(&mut self, member: &'static MemberDescriptor, args: ArgList) -> usize {
        self.calls.push((member.name(), args.len()));
        self.calls.len()
    }
}

/// Forwards every access to a wrapped account.
struct Forward {
    account: Account,
}

impl ProxyHandler for Forward {
    type Target = Account;
    type Output = Result<Box<dyn Reflect>, ReflectError>;

    fn invoke_impl(&mut self, member: &'static MemberDescriptor, args: ArgList) -> Self::Output {
        member.invoke(Receiver::Mut(&mut self.account), args)
    }
}

/// Forwards every access to a wrapped savings account.
struct ForwardSavings {
    savings: Savings,
}

impl ProxyHandler for ForwardSavings {
    type Target = Savings;
    type Output = Result<Box<dyn Reflect>, ReflectError>;

    fn invoke_impl(&mut self, member: &'static MemberDescriptor, args: ArgList) -> Self::Output {
        member.invoke(Receiver::Mut(&mut self.savings), args)
    }
}

#[test]
fn members_of_the_target_are_exposed() {
    let names = Proxy::<Recorder>::members()
        .iter()
        .map(MemberDescriptor::name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["owner", "balance", "deposit", "get_balance"]);

    assert_eq!(Proxy::<Recorder>::fields().len(), 2);
    assert_eq!(Proxy::<Recorder>::functions().len(), 2);
}

#[test]
fn accesses_reach_the_handler() {
    let mut proxy = Proxy::new(Recorder::default());

    assert_eq!(proxy.call("deposit", (5i64,)).unwrap(), 1);
    assert_eq!(proxy.call("owner", ()).unwrap(), 2);

    let token = Proxy::<Recorder>::token("get_balance").unwrap();
    assert_eq!(token.index(), 3);
    assert_eq!(token.member().name(), "get_balance");
    assert_eq!(proxy.call_token(token, ()), 3);
    assert_eq!(proxy.call_token(token, ()), 4);

    assert_eq!(
        proxy.handler().calls,
        [("deposit", 1), ("owner", 0), ("get_balance", 0), ("get_balance", 0)]
    );
}

#[test]
fn unknown_members_are_rejected() {
    let mut proxy = Proxy::new(Recorder::default());

    assert!(Proxy::<Recorder>::token("withdraw").is_none());
    assert!(matches!(
        proxy.call("withdraw", (1i64,)),
        Err(ReflectError::NoMatchingMember { .. })
    ));
    assert!(proxy.into_inner().calls.is_empty());
}

#[test]
fn proxies_add_no_storage() {
    assert_eq!(std::mem::size_of::<Proxy<Recorder>>(), std::mem::size_of::<Recorder>());
    assert_eq!(std::mem::size_of::<Proxy<Forward>>(), std::mem::size_of::<Forward>());
}

#[test]
fn forwarding_handler() {
    let mut proxy = Proxy::new(Forward {
        account: Account {
            owner: String::from("ada"),
            balance: 10,
        },
    });

    let balance = proxy.call("deposit", (15i64,)).unwrap().unwrap();
    assert_eq!(balance.take::<i64>().unwrap(), 25);

    let owner = proxy.call("owner", ()).unwrap().unwrap();
    assert_eq!(owner.take::<String>().unwrap(), "ada");

    // the balance is readonly
    assert!(proxy.call("balance", (0i64,)).unwrap().is_err());
    assert_eq!(proxy.handler().account.get_balance(), 25);
}

#[derive(Default)]
struct SavingsRecorder {
    calls: Vec<&'static str>,
}

impl ProxyHandler for SavingsRecorder {
    type Target = Savings;
    type Output = ();

    fn invoke_impl(&mut self, member: &'static MemberDescriptor, _args: ArgList) {
        self.calls.push(member.name());
    }
}

#[test]
fn base_members_are_exposed_unless_shadowed() {
    let names = Proxy::<SavingsRecorder>::members()
        .iter()
        .map(MemberDescriptor::name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["interest", "get_balance", "owner", "balance", "deposit"]);

    let token = Proxy::<SavingsRecorder>::token("get_balance").unwrap();
    assert_eq!(token.index(), 1);
    assert_eq!(Proxy::<SavingsRecorder>::token("deposit").unwrap().index(), 4);

    let mut proxy = Proxy::new(SavingsRecorder::default());
    proxy.call("owner", ()).unwrap();
    proxy.call_token(token, ());
    assert_eq!(proxy.handler().calls, ["owner", "get_balance"]);
}

#[test]
fn forwarding_to_a_derived_target() {
    let mut proxy = Proxy::new(ForwardSavings {
        savings: Savings {
            account: Account {
                owner: String::from("ada"),
                balance: 100,
            },
            interest: 5,
        },
    });

    // inherited members run on the base sub-object
    let balance = proxy.call("deposit", (20i64,)).unwrap().unwrap();
    assert_eq!(balance.take::<i64>().unwrap(), 120);
    assert_eq!(proxy.handler().savings.account.balance, 120);

    // the shadowing getter wins over the one of the base
    let balance = proxy.call("get_balance", ()).unwrap().unwrap();
    assert_eq!(balance.take::<i64>().unwrap(), 125);

    let owner = proxy.call("owner", ()).unwrap().unwrap();
    assert_eq!(owner.take::<String>().unwrap(), "ada");
}
